//! Error types for conversation processing.

use database::DatabaseError;
use thiserror::Error;

/// Errors that abort a conversation turn.
#[derive(Debug, Error)]
pub enum ConversationError {
    /// Case repository failure.
    #[error("repository error: {0}")]
    Repository(#[from] DatabaseError),
}
