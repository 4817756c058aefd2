use axum::extract::State;

use crate::api::v1::dto::{GraphRequest, TimelineRequest, TimelineResponse};
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::{AppJson, AppState};
use crate::models::BeliefGraph;

use super::run_blocking;

/// `POST /api/v1/graph`
#[utoipa::path(
    post,
    path = "/api/v1/graph",
    tag = "analytics",
    operation_id = "analytics.graph",
    request_body = GraphRequest,
    responses(
        (status = 200, description = "Belief graph over the store", body = BeliefGraph),
        (status = 400, description = "Malformed contradiction reports", body = ApiError),
    )
)]
pub async fn belief_graph(
    State(state): State<AppState>,
    AppJson(req): AppJson<GraphRequest>,
) -> ApiResponse<BeliefGraph> {
    match run_blocking(&state, move |service| Ok(service.graph(req.contradictions))).await {
        Ok(graph) => ApiResponse::success(graph),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/timeline`
#[utoipa::path(
    post,
    path = "/api/v1/timeline",
    tag = "analytics",
    operation_id = "analytics.timeline",
    request_body = TimelineRequest,
    responses(
        (status = 200, description = "Memories in ascending time order", body = TimelineResponse),
    )
)]
pub async fn timeline(
    State(state): State<AppState>,
    AppJson(req): AppJson<TimelineRequest>,
) -> ApiResponse<TimelineResponse> {
    let result = run_blocking(&state, move |service| {
        Ok(service.timeline(req.topic.as_deref()))
    })
    .await;

    match result {
        Ok(items) => ApiResponse::success(TimelineResponse { items }),
        Err(e) => e.into(),
    }
}
