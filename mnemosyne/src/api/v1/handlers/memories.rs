//! v1 memory ingestion and listing.

use axum::extract::{Path, State};

use crate::api::v1::dto::{IngestMemoriesRequest, ListMemoriesResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ResponseMeta};
use crate::api::{AppJson, AppState};
use crate::models::Memory;
use crate::services::{IngestRequest, IngestSummary};

use super::run_blocking;

/// `POST /api/v1/memories:ingest`
#[utoipa::path(
    post,
    path = "/api/v1/memories:ingest",
    tag = "memories",
    operation_id = "memories.ingest",
    request_body = IngestMemoriesRequest,
    responses(
        (status = 200, description = "Text ingested and appended", body = IngestSummary),
        (status = 400, description = "Missing field or invalid timestamp", body = ApiError),
        (status = 401, description = "Missing or invalid API key", body = ApiError),
    )
)]
pub async fn ingest_memories(
    State(state): State<AppState>,
    AppJson(req): AppJson<IngestMemoriesRequest>,
) -> ApiResponse<IngestSummary> {
    let request = IngestRequest {
        text: req.text.unwrap_or_default(),
        source: req.source.unwrap_or_default(),
        timestamp: req.timestamp,
        profile: req.profile,
    };

    match run_blocking(&state, move |service| service.ingest(request)).await {
        Ok(summary) => ApiResponse::success(summary),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/memories`
#[utoipa::path(
    get,
    path = "/api/v1/memories",
    tag = "memories",
    operation_id = "memories.list",
    responses(
        (status = 200, description = "Every stored memory in log order", body = ListMemoriesResponse),
        (status = 401, description = "Missing or invalid API key", body = ApiError),
    )
)]
pub async fn list_memories(State(state): State<AppState>) -> ApiResponse<ListMemoriesResponse> {
    match run_blocking(&state, |service| Ok(service.list())).await {
        Ok(memories) => {
            let meta = ResponseMeta {
                total: Some(memories.len() as u64),
            };
            ApiResponse::success_with_meta(ListMemoriesResponse { memories }, meta)
        }
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/memories/{memoryId}`
#[utoipa::path(
    get,
    path = "/api/v1/memories/{memoryId}",
    tag = "memories",
    operation_id = "memories.get",
    params(("memoryId" = String, Path, description = "Memory ID")),
    responses(
        (status = 200, description = "The stored memory", body = Memory),
        (status = 404, description = "Memory not found", body = ApiError),
        (status = 401, description = "Missing or invalid API key", body = ApiError),
    )
)]
pub async fn get_memory(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<Memory> {
    match run_blocking(&state, move |service| service.get(&id)).await {
        Ok(memory) => ApiResponse::success(memory),
        Err(e) => e.into(),
    }
}
