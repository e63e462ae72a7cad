//! Repository Module
//!
//! Function-style data access over the SQLite pool. Lifecycle transitions are
//! applied as conditional UPDATEs (`WHERE id = ? AND status = ?`) inside a
//! transaction with their side effects, so a move that lost a race never
//! lands; `rows_affected == 0` after a successful pre-read maps to
//! [`RepoError::Conflict`].

pub mod bill;
pub mod menu_item;
pub mod notification;
pub mod order;
pub mod staff;
pub mod table;
pub mod token;

use thiserror::Error;

use crate::lifecycle::LifecycleError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
