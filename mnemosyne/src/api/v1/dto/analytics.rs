use serde::{Deserialize, Serialize};

use crate::models::{Contradiction, Memory};

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct GraphRequest {
    /// Contradiction reports to draw. Detected over the store when absent.
    pub contradictions: Option<Vec<Contradiction>>,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct TimelineRequest {
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct TimelineResponse {
    pub items: Vec<Memory>,
}
