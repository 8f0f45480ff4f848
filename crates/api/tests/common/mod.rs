//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the full router (production middleware stack included) through
//! `tower::ServiceExt::oneshot`, without a TCP listener.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use sitelog_api::auth::csrf;
use sitelog_api::auth::jwt::{generate_access_token, JwtConfig};
use sitelog_api::config::ServerConfig;
use sitelog_api::router::build_app_router;
use sitelog_api::state::AppState;
use sitelog_core::types::DbId;
use sitelog_db::models::user::CreateUser;
use sitelog_db::repositories::UserRepo;
use sitelog_events::{ActivityRecorder, EventLogger};

/// Secret signing every test token.
const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        date_format: "%Y-%m-%d %H:%M".to_string(),
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This goes through [`build_app_router`] so integration tests exercise the
/// same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let logger = EventLogger::new(pool.clone());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        logger: logger.clone(),
        recorder: Arc::new(ActivityRecorder::new(logger)),
    };

    build_app_router(state, &config)
}

/// Insert a user row and mint a Bearer token for them.
pub async fn seed_user(
    pool: &PgPool,
    username: &str,
    display_name: &str,
    role: &str,
) -> (DbId, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            display_name: display_name.to_string(),
            avatar_url: None,
            role: Some(role.to_string()),
        },
    )
    .await
    .expect("user seed should succeed");

    let token = generate_access_token(user.id, role, &test_config().jwt)
        .expect("token generation should succeed");

    (user.id, token)
}

/// Shorthand: seed an admin user named "admin".
pub async fn seed_admin(pool: &PgPool) -> (DbId, String) {
    seed_user(pool, "admin", "Site Admin", "admin").await
}

/// The anti-forgery token the server expects from `user_id`.
pub fn csrf_for(user_id: DbId) -> String {
    csrf::issue_token(TEST_SECRET, user_id)
}

/// Insert an automatic event directly, bypassing the API (which only creates
/// manual events).
pub async fn insert_automatic_event(pool: &PgPool, event_name: &str, note: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO activity_events (user_id, event_name, type, category, importance, note, date)
         VALUES (0, $1, 'automatic', 'Plugin update', 'medium', $2, now())
         RETURNING id",
    )
    .bind(event_name)
    .bind(note)
    .fetch_one(pool)
    .await
    .expect("automatic event seed should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub async fn get(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, bearer(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_anon(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, bearer(token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST with both Bearer auth and the anti-forgery header.
pub async fn post_json_csrf(
    app: Router,
    uri: &str,
    token: &str,
    csrf_token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, bearer(token))
            .header(header::CONTENT_TYPE, "application/json")
            .header("X-CSRF-Token", csrf_token)
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(header::AUTHORIZATION, bearer(token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(header::AUTHORIZATION, bearer(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
