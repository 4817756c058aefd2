//! # V1 API Response Envelope
//!
//! Every v1 endpoint returns an [`ApiResponse<T>`] envelope:
//!
//! ```json
//! {
//!   "data": { ... },                                  // success only
//!   "meta": { "total": 42 },                           // optional
//!   "error": { "code": "invalid_request", "message": "..." }  // error only
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::MnemosyneError;

/// Machine-readable error code included in every error response.
///
/// Serialized as a snake_case string on the wire. Each variant maps to a
/// fixed HTTP status via [`ErrorCode::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed body, missing field or unparsable timestamp. HTTP 400.
    InvalidRequest,
    /// Missing or unknown API key. HTTP 401.
    Unauthorized,
    /// HTTP 404.
    NotFound,
    /// Details are logged, never returned. HTTP 500.
    InternalError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::NotFound => write!(f, "not_found"),
            Self::InternalError => write!(f, "internal_error"),
        }
    }
}

/// Structured error payload within the envelope.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    pub code: ErrorCode,
    /// Human-readable description, safe to show to end users.
    pub message: String,
}

/// Metadata attached to list responses.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Canonical v1 response envelope. `data` and `error` are mutually
/// exclusive; the HTTP status is not serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success response with data (HTTP 200).
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            meta: None,
            error: None,
            status: StatusCode::OK,
        }
    }

    pub fn success_with_meta(data: T, meta: ResponseMeta) -> Self {
        Self {
            data: Some(data),
            meta: Some(meta),
            error: None,
            status: StatusCode::OK,
        }
    }

    /// Error response. HTTP status is derived from the [`ErrorCode`].
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let status = code.status();
        Self {
            data: None,
            meta: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
            status,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize v1 response");
                let body = serde_json::json!({
                    "error": {
                        "code": "internal_error",
                        "message": "An internal error occurred"
                    }
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<MnemosyneError> for ApiResponse<T> {
    /// Internal details are logged and replaced with a generic message.
    fn from(err: MnemosyneError) -> Self {
        match err {
            MnemosyneError::InvalidTimestamp(_) => {
                ApiResponse::error(ErrorCode::InvalidRequest, err.to_string())
            }
            MnemosyneError::Validation(msg) => ApiResponse::error(ErrorCode::InvalidRequest, msg),
            MnemosyneError::Json(ref e) => {
                ApiResponse::error(ErrorCode::InvalidRequest, format!("Invalid JSON: {e}"))
            }
            MnemosyneError::NotFound(msg) => ApiResponse::error(ErrorCode::NotFound, msg),
            ref internal @ (MnemosyneError::Io(_) | MnemosyneError::Internal(_)) => {
                tracing::error!(error = %internal, "Internal error mapped to v1 response");
                ApiResponse::error(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_serializes_without_error() {
        let resp = ApiResponse::success("hello");
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["data"], "hello");
        assert!(json.get("error").is_none());
        assert!(json.get("meta").is_none());
    }

    #[test]
    fn error_response_serializes_without_data() {
        let resp = ApiResponse::<()>::error(ErrorCode::NotFound, "gone");
        let json = serde_json::to_value(&resp).expect("serialize");
        assert!(json.get("data").is_none());
        assert_eq!(json["error"]["code"], "not_found");
        assert_eq!(json["error"]["message"], "gone");
    }

    #[test]
    fn success_with_meta_includes_total() {
        let resp = ApiResponse::success_with_meta(vec![1, 2], ResponseMeta { total: Some(2) });
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["meta"]["total"], 2);
    }

    #[test]
    fn error_code_status_mapping() {
        assert_eq!(ErrorCode::InvalidRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::InternalError.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_code_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorCode::InvalidRequest).unwrap();
        assert_eq!(json, "\"invalid_request\"");
        assert_eq!(ErrorCode::InternalError.to_string(), "internal_error");
    }

    #[test]
    fn invalid_timestamp_maps_to_invalid_request() {
        let resp: ApiResponse<()> = MnemosyneError::InvalidTimestamp("soon".into()).into();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let message = resp.error.map(|e| e.message).unwrap_or_default();
        assert!(message.contains("soon"));
    }

    #[test]
    fn internal_error_does_not_leak() {
        let resp: ApiResponse<()> = MnemosyneError::Internal("disk on fire".into()).into();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error = resp.error.expect("error present");
        assert_eq!(error.code, ErrorCode::InternalError);
        assert_eq!(error.message, "An internal error occurred");
    }
}
