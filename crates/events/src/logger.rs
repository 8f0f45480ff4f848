//! Validates, normalizes, and persists activity events.
//!
//! Both creation paths converge here: the recorder's automatic path and the
//! REST API's manual path. The logger owns sanitization and required-field
//! validation; the store enforces its own invariants again underneath.

use chrono::Utc;

use sitelog_core::activity::{EventKind, Importance};
use sitelog_core::sanitize::{sanitize_line, sanitize_multiline};
use sitelog_core::types::{DbId, Timestamp};
use sitelog_db::models::activity_event::{ActivityEvent, NewActivityEvent};
use sitelog_db::repositories::ActivityEventRepo;
use sitelog_db::{DbPool, StoreError};

/// The actor id recorded on automatic events.
pub const SYSTEM_USER_ID: DbId = 0;

// ---------------------------------------------------------------------------
// Errors and inputs
// ---------------------------------------------------------------------------

/// Errors from the event logging paths.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// A required field was missing or empty after sanitization.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The store rejected or failed the insert.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Fields accepted for a manually entered event.
#[derive(Debug, Clone, Default)]
pub struct ManualEventInput {
    pub event_name: String,
    pub category: String,
    pub importance: Option<Importance>,
    pub note: String,
    /// Defaults to the log instant when absent.
    pub date: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// EventLogger
// ---------------------------------------------------------------------------

/// Normalizes incoming event data and delegates persistence to the store.
///
/// Cheaply cloneable; the pool is reference-counted.
#[derive(Clone)]
pub struct EventLogger {
    pool: DbPool,
}

impl EventLogger {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record an automatic event.
    ///
    /// The actor is the system user and the timestamp is always the log
    /// instant.
    pub async fn log_automatic(
        &self,
        event_name: &str,
        category: &str,
        importance: Importance,
        note: &str,
    ) -> Result<ActivityEvent, LogError> {
        let event = NewActivityEvent {
            user_id: SYSTEM_USER_ID,
            event_name: sanitize_line(event_name),
            kind: EventKind::Automatic,
            category: sanitize_line(category),
            importance,
            note: sanitize_multiline(note),
            date: Utc::now(),
        };

        require_non_empty(&event.event_name, "event_name")?;
        require_non_empty(&event.category, "category")?;

        Ok(ActivityEventRepo::insert(&self.pool, &event).await?)
    }

    /// Record a manually entered event on behalf of `user_id`.
    ///
    /// Missing `event_name`, `category`, or `importance` are rejected before
    /// the store is touched.
    pub async fn log_manual(
        &self,
        user_id: DbId,
        input: ManualEventInput,
    ) -> Result<ActivityEvent, LogError> {
        let event_name = sanitize_line(&input.event_name);
        let category = sanitize_line(&input.category);
        require_non_empty(&event_name, "event_name")?;
        require_non_empty(&category, "category")?;

        let importance = input
            .importance
            .ok_or_else(|| LogError::Validation("importance is required".into()))?;

        let event = NewActivityEvent {
            user_id,
            event_name,
            kind: EventKind::Manual,
            category,
            importance,
            note: sanitize_multiline(&input.note),
            date: input.date.unwrap_or_else(Utc::now),
        };

        Ok(ActivityEventRepo::insert(&self.pool, &event).await?)
    }
}

fn require_non_empty(value: &str, field: &str) -> Result<(), LogError> {
    if value.is_empty() {
        return Err(LogError::Validation(format!("{field} is required")));
    }
    Ok(())
}
