//! HTTP-level integration tests for the category listing.

mod common;

use axum::http::StatusCode;
use common::{body_json, csrf_for, get, get_anon, post_json_csrf, seed_admin};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn defaults_are_served_sorted(pool: PgPool) {
    let (_, token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/categories", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let categories = body_json(response).await;
    let categories: Vec<&str> = categories
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();

    assert_eq!(categories.len(), 7);
    assert!(categories.contains(&"Plugin update"));
    assert!(categories.contains(&"WP core update"));

    let mut sorted = categories.clone();
    sorted.sort();
    assert_eq!(categories, sorted);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn observed_categories_are_merged_and_deduplicated(pool: PgPool) {
    let (admin_id, token) = seed_admin(&pool).await;
    let csrf = csrf_for(admin_id);

    // One brand-new category, one that duplicates a default.
    for category in ["Infrastructure", "Plugin update"] {
        let app = common::build_test_app(pool.clone());
        post_json_csrf(
            app,
            "/api/v1/events",
            &token,
            &csrf,
            serde_json::json!({
                "event_name": "entry",
                "category": category,
                "importance": "low",
            }),
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let categories = body_json(get(app, "/api/v1/categories", &token).await).await;
    let categories: Vec<&str> = categories
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();

    // 7 defaults + 1 observed, the duplicate collapsed.
    assert_eq!(categories.len(), 8);
    assert!(categories.contains(&"Infrastructure"));
    assert_eq!(
        categories.iter().filter(|c| **c == "Plugin update").count(),
        1
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn categories_require_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_anon(app, "/api/v1/categories").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
