use serde::Deserialize;

use crate::models::Memory;

/// Body of `POST /api/v1/answer`. When `memories` is present the answer is
/// computed over those records and the store is not read.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct AnswerRequest {
    pub question: Option<String>,
    pub memories: Option<Vec<Memory>>,
}

/// Body of `POST /api/v1/sessions`. `start` and `end` are ISO 8601 and
/// either may be omitted.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct SessionRequest {
    pub topic: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}
