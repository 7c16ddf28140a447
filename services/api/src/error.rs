//! Error types for the API service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Outcome of a failed request
///
/// Messages are what the client sees. `Unexpected` carries a generic,
/// per-operation message; the underlying cause is logged where it happens.
#[derive(Error, Debug, PartialEq)]
pub enum ApiError {
    /// Malformed identifier or unreadable body
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No record matches the identifier
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other failure
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        ApiError::InvalidArgument("Invalid request body".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ApiError::InvalidArgument(msg) | ApiError::NotFound(msg) | ApiError::Unexpected(msg) => {
                msg
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
