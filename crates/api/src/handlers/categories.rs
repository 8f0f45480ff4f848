//! Handler for the category listing endpoint.

use std::collections::BTreeSet;

use axum::extract::State;
use axum::Json;

use sitelog_core::activity::DEFAULT_CATEGORIES;
use sitelog_db::repositories::ActivityEventRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /categories
///
/// The sorted, de-duplicated union of the built-in default categories and
/// every category observed in the store. Feeds the dashboard's filter UI.
pub async fn list_categories(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<String>>> {
    let mut categories: BTreeSet<String> = DEFAULT_CATEGORIES
        .iter()
        .map(|s| s.to_string())
        .collect();
    categories.extend(ActivityEventRepo::distinct_categories(&state.pool).await?);

    Ok(Json(categories.into_iter().collect()))
}
