//! Handlers for the activity event endpoints.
//!
//! All endpoints require the admin role. Responses carry the stored row plus
//! resolved actor display data and a formatted date.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use sitelog_core::activity::{EventKind, Importance};
use sitelog_core::error::CoreError;
use sitelog_core::sanitize::{sanitize_line, sanitize_multiline};
use sitelog_core::types::{DbId, Timestamp};
use sitelog_db::models::activity_event::{ActivityEvent, EventQuery, UpdateActivityEvent};
use sitelog_db::repositories::{ActivityEventRepo, UserRepo};
use sitelog_events::ManualEventInput;

use crate::auth::csrf;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Header carrying the anti-forgery token on event creation.
const CSRF_HEADER: &str = "x-csrf-token";

// ---------------------------------------------------------------------------
// Request / query parameter types
// ---------------------------------------------------------------------------

/// Query parameters for event listing.
#[derive(Debug, Deserialize)]
pub struct EventListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub importance: Option<String>,
    pub orderby: Option<String>,
    pub order: Option<String>,
}

/// Body for `POST /events`.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub category: String,
    pub importance: Option<String>,
    #[serde(default)]
    pub note: String,
    pub date: Option<Timestamp>,
}

/// Body for `PUT /events/{id}`. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub event_name: Option<String>,
    pub category: Option<String>,
    pub importance: Option<String>,
    pub note: Option<String>,
    pub date: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Actor display data attached to each event in responses.
#[derive(Debug, Clone, Serialize)]
pub struct ActorView {
    pub id: DbId,
    pub name: String,
    pub avatar: String,
}

/// An event as returned by the API: the stored row plus resolved actor
/// display data and a formatted date.
#[derive(Debug, Serialize)]
pub struct EventView {
    pub id: DbId,
    pub user_id: DbId,
    pub user: ActorView,
    pub event_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub importance: String,
    pub note: String,
    pub date: Timestamp,
    pub date_formatted: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the display data for an event actor.
///
/// `user_id = 0` is the system; a missing user row (e.g. deleted since the
/// event was written) resolves to "Unknown".
async fn resolve_actor(pool: &sitelog_db::DbPool, user_id: DbId) -> Result<ActorView, sqlx::Error> {
    if user_id == 0 {
        return Ok(ActorView {
            id: 0,
            name: "System".into(),
            avatar: String::new(),
        });
    }

    match UserRepo::find_by_id(pool, user_id).await? {
        Some(user) => Ok(ActorView {
            id: user_id,
            name: user.display_name,
            avatar: user.avatar_url,
        }),
        None => Ok(ActorView {
            id: user_id,
            name: "Unknown".into(),
            avatar: String::new(),
        }),
    }
}

fn into_view(event: ActivityEvent, actor: ActorView, date_format: &str) -> EventView {
    let date_formatted = event.date.format(date_format).to_string();
    EventView {
        id: event.id,
        user_id: event.user_id,
        user: actor,
        event_name: event.event_name,
        kind: event.kind,
        category: event.category,
        importance: event.importance,
        note: event.note,
        date: event.date,
        date_formatted,
    }
}

/// Enrich a single event.
async fn enrich(state: &AppState, event: ActivityEvent) -> Result<EventView, sqlx::Error> {
    let actor = resolve_actor(&state.pool, event.user_id).await?;
    Ok(into_view(event, actor, &state.config.date_format))
}

/// Parse an optional importance string, rejecting unknown values.
fn parse_importance(value: Option<&str>) -> AppResult<Option<Importance>> {
    match value {
        Some(s) if !s.is_empty() => {
            let importance = s.parse().map_err(AppError::Core)?;
            Ok(Some(importance))
        }
        _ => Ok(None),
    }
}

/// Drop empty query strings so `?search=` behaves like an absent parameter.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// List / get
// ---------------------------------------------------------------------------

/// GET /events
///
/// Query events with filters, sorting, and pagination. Total count and total
/// pages ride in the `X-Total-Count` / `X-Total-Pages` headers.
pub async fn list_events(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<EventListParams>,
) -> AppResult<impl IntoResponse> {
    let kind = match non_empty(params.kind) {
        Some(s) => Some(s.parse::<EventKind>().map_err(AppError::Core)?),
        None => None,
    };
    let importance = parse_importance(params.importance.as_deref())?;

    let query = EventQuery {
        search: non_empty(params.search),
        category: non_empty(params.category),
        kind,
        importance,
        page: params.page,
        per_page: params.per_page,
        orderby: params.orderby,
        order: params.order,
    };

    let page = ActivityEventRepo::page(&state.pool, &query).await?;

    // Resolve each distinct actor once per request.
    let mut actors: HashMap<DbId, ActorView> = HashMap::new();
    let mut views = Vec::with_capacity(page.items.len());
    for event in page.items {
        if !actors.contains_key(&event.user_id) {
            let actor = resolve_actor(&state.pool, event.user_id).await?;
            actors.insert(event.user_id, actor);
        }
        let actor = actors[&event.user_id].clone();
        views.push(into_view(event, actor, &state.config.date_format));
    }

    let headers = [
        ("X-Total-Count", page.total.to_string()),
        ("X-Total-Pages", page.total_pages.to_string()),
    ];

    Ok((headers, Json(views)))
}

/// GET /events/{id}
///
/// Fetch a single event.
pub async fn get_event(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = ActivityEventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "event", id }))?;

    Ok(Json(enrich(&state, event).await?))
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /events
///
/// Create a manual event on behalf of the authenticated admin. Requires a
/// valid `X-CSRF-Token` header on top of Bearer auth.
pub async fn create_event(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    headers: HeaderMap,
    Json(input): Json<CreateEventRequest>,
) -> AppResult<impl IntoResponse> {
    let token = headers
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !csrf::verify_token(&state.config.jwt.secret, admin.user_id, token) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Invalid anti-forgery token".into(),
        )));
    }

    let importance = parse_importance(input.importance.as_deref())?;

    let event = state
        .logger
        .log_manual(
            admin.user_id,
            ManualEventInput {
                event_name: input.event_name,
                category: input.category,
                importance,
                note: input.note,
                date: input.date,
            },
        )
        .await?;

    tracing::info!(
        user_id = admin.user_id,
        event_id = event.id,
        event_name = %event.event_name,
        "Manual event created"
    );

    Ok((StatusCode::CREATED, Json(enrich(&state, event).await?)))
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

/// PUT /events/{id}
///
/// Partially update a manual event. Automatic events answer 403.
pub async fn update_event(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEventRequest>,
) -> AppResult<impl IntoResponse> {
    let event_name = match input.event_name.as_deref().map(sanitize_line) {
        Some(name) if name.is_empty() => {
            return Err(AppError::BadRequest("event_name cannot be empty".into()))
        }
        other => other,
    };
    let category = match input.category.as_deref().map(sanitize_line) {
        Some(cat) if cat.is_empty() => {
            return Err(AppError::BadRequest("category cannot be empty".into()))
        }
        other => other,
    };
    let importance = parse_importance(input.importance.as_deref())?;

    let update = UpdateActivityEvent {
        event_name,
        category,
        importance,
        note: input.note.as_deref().map(sanitize_multiline),
        date: input.date,
    };

    let event = ActivityEventRepo::update(&state.pool, id, &update).await?;

    tracing::info!(user_id = admin.user_id, event_id = id, "Manual event updated");

    Ok(Json(enrich(&state, event).await?))
}

/// DELETE /events/{id}
///
/// Delete a manual event. Automatic events answer 403.
pub async fn delete_event(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ActivityEventRepo::delete(&state.pool, id).await?;

    tracing::info!(user_id = admin.user_id, event_id = id, "Manual event deleted");

    Ok(StatusCode::NO_CONTENT)
}
