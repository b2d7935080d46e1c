//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (database ping)
//!
//! # Catalog
//! GET  /api/products?category=          - Product listing
//! GET  /api/products/{id}               - Product detail
//!
//! # Tracking
//! POST /api/products/{id}/interactions  - Record a shopper interaction
//! ```

pub mod health;
pub mod interactions;
pub mod products;

use axum::{Router, middleware};

use crate::middleware::security_headers_middleware;
use crate::state::AppState;

/// Build the storefront router with security headers applied.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(interactions::router())
        .layer(middleware::from_fn(security_headers_middleware))
}
