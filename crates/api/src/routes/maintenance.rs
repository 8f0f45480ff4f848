//! Route definitions for administrative maintenance.

use axum::routing::delete;
use axum::Router;

use crate::handlers::maintenance;
use crate::state::AppState;

/// Maintenance routes mounted at `/admin`.
pub fn router() -> Router<AppState> {
    Router::new().route("/admin/storage", delete(maintenance::drop_storage))
}
