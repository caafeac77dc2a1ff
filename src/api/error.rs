//! Error types for the HTTP layer

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::types::StreamError;

/// Errors surfaced by HTTP handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A page template failed to render
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The broadcaster could not be reached
    #[error("stream error: {0}")]
    Stream(#[from] StreamError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Stream(StreamError::BroadcasterGone) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Stream(StreamError::InvalidState(_)) => StatusCode::CONFLICT,
        };
        tracing::warn!(%status, error = %self, "Request failed");

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
