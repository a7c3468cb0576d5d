//! Application state shared across handlers.

use std::sync::Arc;

use courtbot::{Conversation, SessionCodec, SqliteCaseRepository};
use database::Database;

use crate::config::Environment;
use crate::error::{AppError, ErrorKind};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// SMS handler chain and its repository.
    pub conversation: Arc<Conversation<SqliteCaseRepository>>,
    /// Session cookie signer.
    pub sessions: SessionCodec,
    /// Deployment environment.
    pub environment: Environment,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        conversation: Conversation<SqliteCaseRepository>,
        sessions: SessionCodec,
        environment: Environment,
    ) -> Self {
        Self {
            conversation: Arc::new(conversation),
            sessions,
            environment,
        }
    }

    /// Database behind the conversation's repository.
    pub fn db(&self) -> &Database {
        self.conversation.repository().database()
    }

    /// Wrap a failure, exposing details outside production.
    pub fn error(&self, err: impl Into<ErrorKind>) -> AppError {
        AppError::new(err.into(), !self.environment.is_production())
    }
}
