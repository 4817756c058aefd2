//! # V1 API Key Authentication Middleware
//!
//! Guards the protected v1 routes with Bearer tokens from
//! `MNEMOSYNE_API_KEYS`. With no keys configured the server runs as a local
//! personal tool and every route is open.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;

use super::response::{ApiResponse, ErrorCode};

/// # Behavior
///
/// - No keys configured: the request passes through.
/// - Missing or non-Bearer `Authorization` header: 401.
/// - Token not in the configured list: 401.
///
/// Errors use the v1 envelope:
/// ```json
/// { "error": { "code": "unauthorized", "message": "..." } }
/// ```
pub async fn v1_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let keys = &state.config.server.api_keys;
    if keys.is_empty() {
        return next.run(request).await;
    }

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(token) => token,
            None => {
                return ApiResponse::<()>::error(
                    ErrorCode::Unauthorized,
                    "Invalid authorization header format. Expected: Bearer <token>",
                )
                .into_response();
            }
        },
        None => {
            return ApiResponse::<()>::error(
                ErrorCode::Unauthorized,
                "Missing authorization header",
            )
            .into_response();
        }
    };

    if keys.iter().any(|key| key == token) {
        next.run(request).await
    } else {
        tracing::debug!("Rejected request with unknown API key");
        ApiResponse::<()>::error(ErrorCode::Unauthorized, "Invalid API key").into_response()
    }
}
