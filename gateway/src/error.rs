//! Gateway error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response body, mirroring the backend's error shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Failures the gateway reports itself (validation and upstream transport).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request shape validation failed; the request is not forwarded.
    #[error("{0}")]
    Validation(String),

    /// The backend could not be reached or did not answer.
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            GatewayError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            GatewayError::Upstream(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("UPSTREAM_ERROR", e.to_string()),
            ),
        };

        (status, Json(error)).into_response()
    }
}
