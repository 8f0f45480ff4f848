//! Administrative maintenance endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use sitelog_db::repositories::ActivityEventRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// DELETE /admin/storage
///
/// Drop the activity events table. This is the uninstall path; all recorded
/// history is destroyed and the service must be re-migrated before further
/// use.
pub async fn drop_storage(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<impl IntoResponse> {
    ActivityEventRepo::drop_table(&state.pool)
        .await
        .map_err(AppError::Database)?;

    tracing::warn!(user_id = admin.user_id, "Activity event storage dropped");

    Ok(StatusCode::NO_CONTENT)
}
