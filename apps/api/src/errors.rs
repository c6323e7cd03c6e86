use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::chat::bridge::TransportError;
use crate::session::SessionInitError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Fatal for the session's AI features; reported once per session.
    #[error(transparent)]
    SessionInit(#[from] SessionInitError),

    /// Recoverable; the session and its transcript stay as they were.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::SessionInit(e) => {
                tracing::error!("Session init error: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SESSION_INIT_ERROR",
                    e.to_string(),
                )
            }
            AppError::Transport(e) => {
                tracing::warn!("Transport error: {e}");
                (StatusCode::BAD_GATEWAY, "TRANSPORT_ERROR", e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
