//! Session-related handlers.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::auth::csrf;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// Response payload for `GET /auth/csrf`.
#[derive(Debug, Serialize)]
pub struct CsrfResponse {
    pub csrf_token: String,
}

/// GET /auth/csrf
///
/// Return the anti-forgery token for the authenticated user. The token must
/// be echoed in the `X-CSRF-Token` header when creating events.
pub async fn csrf_token(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<CsrfResponse>> {
    Ok(Json(CsrfResponse {
        csrf_token: csrf::issue_token(&state.config.jwt.secret, user.user_id),
    }))
}
