use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Unified error type for hub API responses.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or non-integer `timestamp` query parameter.
    InvalidTimestamp,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimestamp => write!(f, "invalid_timestamp"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_str) = match &self {
            Self::InvalidTimestamp => {
                (StatusCode::BAD_REQUEST, "Invalid timestamp provided")
            }
        };

        let body = json!({ "error": error_str });
        (status, axum::Json(body)).into_response()
    }
}
