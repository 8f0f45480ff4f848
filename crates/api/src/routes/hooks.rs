//! Route definition for lifecycle notification ingestion.

use axum::routing::post;
use axum::Router;

use crate::handlers::hooks;
use crate::state::AppState;

/// Hook ingestion mounted at `/hooks`.
pub fn router() -> Router<AppState> {
    Router::new().route("/hooks", post(hooks::ingest_hook))
}
