//! Route definitions, one module per resource.

pub mod auth;
pub mod categories;
pub mod events;
pub mod health;
pub mod hooks;
pub mod maintenance;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// GET    /auth/csrf        anti-forgery token (any authenticated user)
/// GET    /events           list with filters / sorting / pagination
/// POST   /events           create a manual event (CSRF token required)
/// GET    /events/{id}      single event
/// PUT    /events/{id}      update a manual event
/// DELETE /events/{id}      delete a manual event
/// GET    /categories       sorted de-duplicated category list
/// POST   /hooks            ingest a host lifecycle notification
/// DELETE /admin/storage    drop the events table (uninstall)
/// ```
///
/// Everything except `/auth/csrf` requires the `admin` role (enforced by
/// handler extractors).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(events::router())
        .merge(categories::router())
        .merge(hooks::router())
        .merge(maintenance::router())
}
