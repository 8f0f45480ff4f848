//! HTTP-level integration tests for session endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, csrf_for, get, get_anon, seed_user};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn csrf_endpoint_returns_the_expected_token(pool: PgPool) {
    let (user_id, token) = seed_user(&pool, "viewer", "Just Watching", "viewer").await;

    // Any authenticated role may fetch its anti-forgery token.
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/csrf", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["csrf_token"], csrf_for(user_id));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn csrf_endpoint_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_anon(app, "/api/v1/auth/csrf").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
