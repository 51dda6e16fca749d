//! Lifecycle Error Types

use shared::order::OrderStatus;
use thiserror::Error;

use crate::db::repository::RepoError;

/// Errors surfaced by the lifecycle core.
///
/// Every kind carries the offending identifier or both statuses in its
/// message; the HTTP layer maps kinds to status codes and never leaks
/// raw database text.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Menu item {menu_item_id} is not available at branch {branch_id}")]
    ItemUnavailable { branch_id: i64, menu_item_id: i64 },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for LifecycleError {
    fn from(err: sqlx::Error) -> Self {
        LifecycleError::Database(err.to_string())
    }
}

impl From<RepoError> for LifecycleError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(msg) | RepoError::NotFound(msg) => {
                LifecycleError::InvalidState(msg)
            }
            RepoError::Validation(msg) => LifecycleError::Validation(msg),
            RepoError::Database(msg) => LifecycleError::Database(msg),
        }
    }
}

/// Result type for lifecycle operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;
