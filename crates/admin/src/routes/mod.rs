//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database ping)
//!
//! # Auth
//! POST /api/auth/login         - Email/password login, starts a session
//! POST /api/auth/logout        - Clear the session
//! GET  /api/auth/me            - Current admin
//!
//! # Insights (admin session required)
//! GET  /api/ml-insights        - Product performance report
//! ```

pub mod auth;
pub mod health;
pub mod insights;

use axum::Router;

use crate::state::AppState;

/// Build the complete admin router (without session or tracing layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(insights::router())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::config::AdminConfig;
    use crate::db::create_lazy_pool;

    fn app() -> Router {
        let config = AdminConfig::from_vars(|key| match key {
            "ADMIN_DATABASE_URL" => Some("postgres://restwell@localhost/restwell_test".to_string()),
            "ADMIN_BASE_URL" => Some("http://localhost:3001".to_string()),
            _ => None,
        })
        .unwrap();
        let pool = create_lazy_pool(&config.database_url).unwrap();
        routes().with_state(AppState::new(config, pool))
    }

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_insights_requires_admin_session() {
        let (status, json) = get("/api/ml-insights").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Not authorized, admin login required");
    }

    #[tokio::test]
    async fn test_me_requires_admin_session() {
        let (status, json) = get("/api/auth/me").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _) = get("/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
