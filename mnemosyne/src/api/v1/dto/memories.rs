use serde::{Deserialize, Serialize};

use crate::models::{IngestProfile, Memory};

/// Body of `POST /api/v1/memories:ingest`. Missing fields are reported as
/// validation errors by the handler, not as JSON rejections.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct IngestMemoriesRequest {
    pub text: Option<String>,
    /// Free-form origin tag, e.g. `note`, `chat`, `voice`.
    pub source: Option<String>,
    /// ISO 8601. Defaults to the current UTC time.
    pub timestamp: Option<String>,
    pub profile: Option<IngestProfile>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ListMemoriesResponse {
    pub memories: Vec<Memory>,
}
