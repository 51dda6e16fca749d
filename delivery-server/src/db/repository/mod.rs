//! Repository Module
//!
//! Provides data access for the SQLite tables. Repositories are plain
//! module-level functions taking the pool (or an open transaction for
//! multi-write operations); all business rules live in the lifecycle
//! core, not here.

pub mod assignment;
pub mod branch;
pub mod customer;
pub mod menu;
pub mod order;
pub mod rider;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// SQLite transaction alias used by multi-write repository helpers
pub type SqliteTx<'a> = sqlx::Transaction<'a, sqlx::Sqlite>;
