//! Error types for the web server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Body sent for unrecovered failures in production.
pub const GENERIC_ERROR: &str = "Sorry, internal server error";

/// Failures that can occur while handling a request.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] database::DatabaseError),

    /// Conversation handling error.
    #[error("Conversation error: {0}")]
    Conversation(#[from] courtbot::ConversationError),
}

/// A request failure, rendered as HTTP 500.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct AppError {
    kind: ErrorKind,
    expose_details: bool,
}

impl AppError {
    pub fn new(kind: ErrorKind, expose_details: bool) -> Self {
        Self {
            kind,
            expose_details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.kind, "Request failed");

        let body = if self.expose_details {
            self.kind.to_string()
        } else {
            GENERIC_ERROR.to_string()
        };

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
