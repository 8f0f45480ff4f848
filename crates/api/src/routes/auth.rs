//! Route definitions for session endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Auth routes mounted at `/auth`.
pub fn router() -> Router<AppState> {
    Router::new().route("/auth/csrf", get(auth::csrf_token))
}
