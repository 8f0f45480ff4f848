//! Ingestion endpoint for host lifecycle notifications.
//!
//! The host platform's integration glue POSTs lifecycle notifications here.
//! Recording happens inline with the request (a listener runs synchronously
//! with its trigger) but is best-effort: once the payload parses the endpoint
//! answers 202 whether or not the event could be written.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use sitelog_events::LifecycleEvent;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// POST /hooks
///
/// Accept a lifecycle notification and record the corresponding activity
/// event, if any.
pub async fn ingest_hook(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(event): Json<LifecycleEvent>,
) -> AppResult<impl IntoResponse> {
    state.recorder.record(&event).await;
    Ok(StatusCode::ACCEPTED)
}
