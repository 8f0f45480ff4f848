//! User entity model. Users are resolved as event actors for display and
//! carry the role checked by the API's authorization layer.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sitelog_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub display_name: String,
    pub avatar_url: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub role: Option<String>,
}
