//! Database error types.

use thiserror::Error;

use crate::crypto::CryptoError;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Phone number encryption or decryption failed
    #[error("phone crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
