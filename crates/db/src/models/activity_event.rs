//! Activity event entity models and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use sitelog_core::activity::{EventKind, Importance};
use sitelog_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Activity event entity
// ---------------------------------------------------------------------------

/// A row from the `activity_events` table.
///
/// `kind` is persisted in the `type` column. Rows with `kind = "automatic"`
/// are immutable once written.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityEvent {
    pub id: DbId,
    pub user_id: DbId,
    pub event_name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub importance: String,
    pub note: String,
    pub date: Timestamp,
}

// ---------------------------------------------------------------------------
// Create / update DTOs
// ---------------------------------------------------------------------------

/// DTO for inserting a new event. Built by the logger, never directly from
/// request payloads.
#[derive(Debug, Clone)]
pub struct NewActivityEvent {
    pub user_id: DbId,
    pub event_name: String,
    pub kind: EventKind,
    pub category: String,
    pub importance: Importance,
    pub note: String,
    pub date: Timestamp,
}

/// Partial update for a manual event. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateActivityEvent {
    pub event_name: Option<String>,
    pub category: Option<String>,
    pub importance: Option<Importance>,
    pub note: Option<String>,
    pub date: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Filter, pagination, and sort parameters for event listing.
///
/// All fields are optional; defaults and clamping are applied in the
/// repository (`page` 1, `per_page` 40 clamped to [1, 100], sort `date DESC`).
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// Case-insensitive substring match over `event_name` OR `note`.
    pub search: Option<String>,
    pub category: Option<String>,
    pub kind: Option<EventKind>,
    pub importance: Option<Importance>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub orderby: Option<String>,
    pub order: Option<String>,
}

/// One page of events plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct EventPage {
    pub items: Vec<ActivityEvent>,
    pub total: i64,
    pub total_pages: i64,
}
