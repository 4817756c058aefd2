use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::MnemosyneError;

/// `axum::Json` whose rejections come back as v1 error envelopes.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(MnemosyneError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for MnemosyneError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> MnemosyneError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            match extract_missing_field(&message) {
                Some(field) => MnemosyneError::Validation(format!("Missing required field: {field}")),
                None => MnemosyneError::Validation(format!("Invalid JSON: {message}")),
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            MnemosyneError::Validation(format!("Invalid JSON body: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => MnemosyneError::Validation(
            "Missing `Content-Type: application/json` header".to_string(),
        ),
        JsonRejection::BytesRejection(_) => {
            MnemosyneError::Internal("Failed to read request body".to_string())
        }
        _ => MnemosyneError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}
