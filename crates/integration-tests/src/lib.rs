//! Integration tests for Restwell.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p restwell-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `insights_report` - Event log to insights payload, through the public APIs
//! - `routers` - Admin and storefront routers without a live database
//! - `live_database` - Repositories and the logged-in insights flow against
//!   `PostgreSQL` (ignored by default; set `TEST_DATABASE_URL` and pass
//!   `--ignored`)
//!
//! Fixtures shared by the test files live here.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use restwell_core::{InteractionEvent, InteractionId, InteractionKind, Product, ProductId};

/// A small mattress catalog in id order.
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    vec![
        Product::new(ProductId::new(1), "Cloud Hybrid", "mattress", Decimal::new(89_900, 2), 25),
        Product::new(ProductId::new(2), "Firm Support", "mattress", Decimal::new(64_900, 2), 15),
        Product::new(ProductId::new(3), "Memory Pillow", "pillow", Decimal::new(4_900, 2), 5),
        Product::new(ProductId::new(4), "Linen Sheet Set", "bedding", Decimal::new(12_900, 2), 0),
    ]
}

/// `count` events of one kind for one product, one minute apart.
#[must_use]
pub fn events(product: i32, kind: InteractionKind, count: usize, first_id: i64) -> Vec<InteractionEvent> {
    let start = DateTime::<Utc>::UNIX_EPOCH + Duration::days(20_000);
    (0..count)
        .map(|i| {
            let offset = i64::try_from(i).unwrap_or(i64::MAX);
            InteractionEvent {
                id: InteractionId::new(first_id + offset),
                product_id: ProductId::new(product),
                user_id: None,
                kind,
                occurred_at: start + Duration::minutes(offset),
                session_id: Some(format!("sess-{}", i % 3)),
            }
        })
        .collect()
}

/// Interaction log for [`sample_catalog`]: products 1 and 2 have views,
/// product 3 only has clicks, product 4 has nothing.
#[must_use]
pub fn sample_log() -> Vec<InteractionEvent> {
    let mut log = Vec::new();
    log.extend(events(1, InteractionKind::View, 500, 1));
    log.extend(events(1, InteractionKind::AddToCart, 40, 1_000));
    log.extend(events(1, InteractionKind::Purchase, 12, 2_000));
    log.extend(events(2, InteractionKind::View, 750, 3_000));
    log.extend(events(2, InteractionKind::Click, 30, 4_000));
    log.extend(events(3, InteractionKind::Click, 8, 5_000));
    log
}
