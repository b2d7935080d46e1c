//! Router-level tests for both services.
//!
//! Pools are lazy, so nothing here touches a database: every request is
//! rejected or answered before a query would run.

#![allow(clippy::unwrap_used)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use tower::ServiceExt;

use restwell_admin::config::AdminConfig;
use restwell_storefront::config::StorefrontConfig;

const TEST_DATABASE_URL: &str = "postgres://restwell@localhost/restwell_test";

fn admin_app() -> Router {
    let config = AdminConfig::from_vars(|key| match key {
        "DATABASE_URL" => Some(TEST_DATABASE_URL.to_string()),
        "ADMIN_BASE_URL" => Some("http://localhost:3001".to_string()),
        _ => None,
    })
    .unwrap();
    let pool = restwell_admin::db::create_lazy_pool(&config.database_url).unwrap();
    restwell_admin::routes::routes()
        .with_state(restwell_admin::state::AppState::new(config, pool))
}

fn storefront_app() -> Router {
    let config = StorefrontConfig::from_vars(|key| match key {
        "DATABASE_URL" => Some(TEST_DATABASE_URL.to_string()),
        "STOREFRONT_BASE_URL" => Some("http://localhost:3000".to_string()),
        _ => None,
    })
    .unwrap();
    let pool = restwell_storefront::db::create_lazy_pool(&config.database_url).unwrap();
    restwell_storefront::routes::routes()
        .with_state(restwell_storefront::state::AppState::new(config, pool))
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn test_insights_rejects_anonymous_requests() {
    let response = admin_app()
        .oneshot(Request::get("/api/ml-insights").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["success"], false);
    assert!(json.get("data").is_none());
}

#[tokio::test]
async fn test_admin_health_is_public() {
    let response = admin_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Storefront
// =============================================================================

#[tokio::test]
async fn test_tracking_rejects_unknown_interaction_type() {
    let response = storefront_app()
        .oneshot(
            Request::post("/api/products/7/interactions")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"type":"add_to_cart"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["success"], false);
}

#[tokio::test]
async fn test_storefront_rejects_non_numeric_product_id() {
    let response = storefront_app()
        .oneshot(Request::get("/api/products/cloud-hybrid").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
