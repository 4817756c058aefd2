//! v1 question answering and thinking sessions.

use axum::extract::State;

use crate::api::v1::dto::{AnswerRequest, SessionRequest};
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::{AppJson, AppState};
use crate::services::{AnswerResponse, ThinkingSession};

use super::run_blocking;

/// `POST /api/v1/answer`
#[utoipa::path(
    post,
    path = "/api/v1/answer",
    tag = "query",
    operation_id = "query.answer",
    request_body = AnswerRequest,
    responses(
        (status = 200, description = "Rendered four-section answer", body = AnswerResponse),
        (status = 400, description = "Missing question or malformed memories", body = ApiError),
    )
)]
pub async fn answer(
    State(state): State<AppState>,
    AppJson(req): AppJson<AnswerRequest>,
) -> ApiResponse<AnswerResponse> {
    let question = req.question.unwrap_or_default();
    let result = run_blocking(&state, move |service| match req.memories {
        Some(memories) => service.answer_over(&memories, &question),
        None => service.answer(&question),
    })
    .await;

    match result {
        Ok(response) => ApiResponse::success(response),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/sessions`
///
/// Appends a reflection memory summarizing the session.
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    tag = "query",
    operation_id = "query.session",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session answer and stored summary", body = ThinkingSession),
        (status = 400, description = "Missing topic or invalid bound", body = ApiError),
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    AppJson(req): AppJson<SessionRequest>,
) -> ApiResponse<ThinkingSession> {
    let topic = req.topic.unwrap_or_default();
    let result = run_blocking(&state, move |service| {
        service.thinking_session(&topic, req.start.as_deref(), req.end.as_deref())
    })
    .await;

    match result {
        Ok(session) => ApiResponse::success(session),
        Err(e) => e.into(),
    }
}
