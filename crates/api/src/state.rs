use std::sync::Arc;

use sitelog_events::{ActivityRecorder, EventLogger};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sitelog_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Event logger used by the manual creation path.
    pub logger: EventLogger,
    /// Recorder used inline by the hook ingestion path.
    pub recorder: Arc<ActivityRecorder>,
}
