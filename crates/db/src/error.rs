//! Store-level error type shared by repositories.

use sitelog_core::types::DbId;

/// Errors surfaced by event store mutations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No event exists with the given id.
    #[error("event {0} not found")]
    NotFound(DbId),

    /// The event exists but is automatic, so it cannot be updated or deleted.
    #[error("event {0} is automatic and immutable")]
    Immutable(DbId),

    /// A required text field was missing or empty at insert time.
    #[error("required field `{0}` is empty")]
    EmptyField(&'static str),

    /// Any underlying database failure.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
