//! Tests against a live `PostgreSQL` database.
//!
//! These tests require:
//! - A running `PostgreSQL` database reachable at `TEST_DATABASE_URL`
//!
//! Both migration sets are applied on first use. Every test creates its own
//! products and admin account, so runs never depend on existing rows.
//!
//! Run with: `cargo test -p restwell-integration-tests -- --ignored`

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    },
};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;

use restwell_admin::config::AdminConfig;
use restwell_admin::db::CatalogRepository;
use restwell_admin::middleware::create_session_layer;
use restwell_admin::services::{AdminAuthService, InteractionTally};
use restwell_core::{AdminRole, InteractionEvent, InteractionKind, Product};
use restwell_storefront::db::{InteractionRepository, NewInteraction, NewProduct, ProductRepository};

const TEST_PASSWORD: &str = "correct horse battery";

fn database_url() -> String {
    std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set")
}

async fn migrated_pool() -> PgPool {
    let pool = PgPool::connect(&database_url())
        .await
        .expect("Failed to connect to test database");

    let mut storefront = sqlx::migrate!("../storefront/migrations");
    storefront.set_ignore_missing(true);
    storefront.run(&pool).await.expect("storefront migrations");

    let mut admin = sqlx::migrate!("../admin/migrations");
    admin.set_ignore_missing(true);
    admin.run(&pool).await.expect("admin migrations");

    pool
}

/// Tag that keeps rows from concurrent runs apart.
fn unique_tag() -> String {
    format!("it-{:08x}", rand::random::<u32>())
}

async fn create_product(pool: &PgPool, name: &str, category: &str, num_reviews: i32) -> Product {
    ProductRepository::new(pool)
        .create(&NewProduct {
            name: name.to_string(),
            category: category.to_string(),
            price: Decimal::new(64_900, 2),
            num_reviews,
        })
        .await
        .expect("Failed to create product")
}

/// Record `count` events of `kind`, one minute apart.
async fn record(
    pool: &PgPool,
    product: &Product,
    kind: InteractionKind,
    count: i64,
    start: DateTime<Utc>,
) -> Vec<InteractionEvent> {
    let repo = InteractionRepository::new(pool);
    let mut recorded = Vec::new();
    for i in 0..count {
        let event = repo
            .record(&NewInteraction {
                product_id: product.id,
                user_id: None,
                kind,
                session_id: Some(format!("sess-{}", i % 4)),
                occurred_at: Some(start + Duration::minutes(i)),
            })
            .await
            .expect("Failed to record interaction");
        recorded.push(event);
    }
    recorded
}

fn admin_app(pool: PgPool) -> Router {
    let config = AdminConfig::from_vars(|key| match key {
        "DATABASE_URL" => Some(database_url()),
        "ADMIN_BASE_URL" => Some("http://localhost:3001".to_string()),
        "INSIGHTS_FALLBACK" => Some("report".to_string()),
        _ => None,
    })
    .unwrap();
    let session_layer = create_session_layer(&pool, &config);
    restwell_admin::routes::routes()
        .layer(session_layer)
        .with_state(restwell_admin::state::AppState::new(config, pool))
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

// ============================================================================
// Catalog Repository
// ============================================================================

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_grouped_tally_matches_event_log() {
    let pool = migrated_pool().await;
    let tag = unique_tag();
    let start = Utc::now() - Duration::days(3);

    let hybrid = create_product(&pool, "Cloud Hybrid", &tag, 25).await;
    let topper = create_product(&pool, "Wool Topper", &tag, 0).await;

    let mut log = Vec::new();
    log.extend(record(&pool, &hybrid, InteractionKind::View, 12, start).await);
    log.extend(record(&pool, &hybrid, InteractionKind::AddToCart, 4, start).await);
    log.extend(record(&pool, &hybrid, InteractionKind::Purchase, 2, start).await);
    log.extend(record(&pool, &topper, InteractionKind::Click, 3, start).await);

    let grouped = CatalogRepository::new(&pool)
        .interaction_tally()
        .await
        .expect("Failed to tally interactions");
    let from_log = InteractionTally::from_events(&log);

    for product in [&hybrid, &topper] {
        assert_eq!(grouped.get(product.id), from_log.get(product.id));
    }
    assert_eq!(grouped.get(hybrid.id).views, 12);
    assert_eq!(grouped.get(hybrid.id).adds, 4);
    assert_eq!(grouped.get(hybrid.id).purchases, 2);
    assert_eq!(grouped.get(topper.id).clicks, 3);
    assert_eq!(grouped.get(topper.id).views, 0);
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_list_products_returns_catalog_rows() {
    let pool = migrated_pool().await;
    let tag = unique_tag();

    let first = create_product(&pool, "Firm Support", &tag, 15).await;
    let second = create_product(&pool, "Memory Pillow", &tag, 5).await;

    let products = CatalogRepository::new(&pool)
        .list_products()
        .await
        .expect("Failed to list products");

    let ours: Vec<&Product> = products.iter().filter(|p| p.category == tag).collect();
    assert_eq!(ours.len(), 2);
    assert_eq!(ours[0], &first);
    assert_eq!(ours[1], &second);
    assert!(products.windows(2).all(|w| w[0].id < w[1].id));
}

// ============================================================================
// Insights Endpoint
// ============================================================================

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_logged_in_admin_gets_insights() {
    let pool = migrated_pool().await;
    let tag = unique_tag();
    let email = format!("{tag}@restwell.test");

    AdminAuthService::new(&pool)
        .create_admin(&email, "Integration Admin", AdminRole::Admin, TEST_PASSWORD)
        .await
        .expect("Failed to create admin");

    let product = create_product(&pool, "Cloud Hybrid", &tag, 25).await;
    record(&pool, &product, InteractionKind::View, 500, Utc::now() - Duration::days(1)).await;

    let app = admin_app(pool);

    let login = app
        .clone()
        .oneshot(
            Request::post("/api/auth/login")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": email, "password": TEST_PASSWORD }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);

    let cookie = login
        .headers()
        .get(SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("rw_admin_session="));

    let response = app
        .oneshot(
            Request::get("/api/ml-insights")
                .header(COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["success"], true);

    let data = &json["data"];
    assert!(data["performance"].is_array());
    assert_eq!(data["forecast"].as_array().unwrap().len(), 3);
    assert_eq!(data["featureImportance"].as_array().unwrap().len(), 4);
    assert!(data["anomalies"].as_array().unwrap().len() <= 2);

    let row = data["performance"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["id"] == product.id.get())
        .expect("created product should be in the report");
    assert_eq!(row["views"], 500);
    assert_eq!(row["sales"], 25);
    assert_eq!(row["convRate"], 5.0);
    assert_eq!(row["cluster"], "Top Performer");
    assert_eq!(row["simulated"], json!([]));
}
