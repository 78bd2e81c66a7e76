//! Error types for record store operations.

use thiserror::Error;

/// Errors that can occur while talking to the book table.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite database operation failure.
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// Schema creation failure.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Table, column or type name that is not a plain SQL identifier.
    #[error("invalid identifier '{0}': must contain only alphanumeric characters and underscores")]
    InvalidIdentifier(String),
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
