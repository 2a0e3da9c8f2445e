//! API error types and responses.
//!
//! Every error body has the shape `{"error": "<message>"}`, which is what the
//! dashboard front end reads.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::stripe::StripeError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing session, or a write the provider rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request - invalid input or unsupported method.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// External service error, message passed through.
    #[error("external service error: {0}")]
    ExternalService(String),

    /// Internal server error. The message is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::ExternalService(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Read-path failures on pages surface as a generic server error.
impl From<StripeError> for ApiError {
    fn from(err: StripeError) -> Self {
        Self::Internal(err.to_string())
    }
}
