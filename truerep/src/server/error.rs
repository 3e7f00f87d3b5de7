//! HTTP-facing error type.
//!
//! Handlers return `Result<T, ApiError>`. Server-side failures are logged in
//! full and answered with a generic body; client-side failures carry their
//! reason back to the caller.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The index template is missing or failed to render.
    #[error("render error: {0}")]
    Render(#[from] minijinja::Error),

    /// The request body could not be read as a JSON object.
    #[error("malformed request: {reason}")]
    MalformedRequest { status: StatusCode, reason: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedRequest {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Render(e) => {
                error!(error = %e, detail = ?e.detail(), "failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
            Self::MalformedRequest { status, reason } => {
                warn!(status = status.as_u16(), %reason, "rejected request body");
                (status, reason)
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
