//! Insights route handler.
//!
//! `GET /api/ml-insights` - product performance, forecast, feature
//! importance and anomalies for the admin dashboard. The dashboard polls this
//! endpoint; every call recomputes the report from the database.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tracing::instrument;

use restwell_core::Product;

use crate::db::{CatalogRepository, RepositoryError};
use crate::error::ErrorBody;
use crate::middleware::RequireAdminAuth;
use crate::services::insights::{
    FallbackPolicy, InsightsReport, InteractionTally, RandomPlaceholders, build_report,
};
use crate::state::AppState;

/// Message returned for any failure while building the report.
pub const INSIGHTS_FAILURE_MESSAGE: &str = "Internal Server Error during ML processing";

/// Build the insights router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/ml-insights", get(ml_insights))
}

/// Successful insights response.
#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub success: bool,
    pub data: InsightsReport,
}

/// Any failure while reading the catalog. Always a generic 500.
#[derive(Debug)]
pub struct InsightsFailure(RepositoryError);

impl From<RepositoryError> for InsightsFailure {
    fn from(err: RepositoryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for InsightsFailure {
    fn into_response(self) -> Response {
        let event_id = sentry::capture_error(&self.0);
        tracing::error!(
            error = %self.0,
            sentry_event_id = %event_id,
            "Insights report failed"
        );
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(INSIGHTS_FAILURE_MESSAGE)),
        )
            .into_response()
    }
}

/// GET /api/ml-insights
#[instrument(skip_all, fields(admin_user_id = %admin.id))]
async fn ml_insights(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<InsightsResponse>, InsightsFailure> {
    let started = Instant::now();
    let catalog = CatalogRepository::new(state.pool());

    let products = catalog.list_products().await?;
    let tally = catalog.interaction_tally().await?;

    let policy = state.config().insights.fallback;
    let report = compute(&products, &tally, policy);

    tracing::info!(
        products = products.len(),
        interactions = tally.total_events(),
        ?policy,
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "Insights report built"
    );

    Ok(Json(InsightsResponse {
        success: true,
        data: report,
    }))
}

/// Build the report with thread-local randomness.
///
/// Kept synchronous so the non-`Send` RNG never lives across an `.await`.
fn compute(products: &[Product], tally: &InteractionTally, policy: FallbackPolicy) -> InsightsReport {
    build_report(products, tally, policy, &mut RandomPlaceholders::thread())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    #[tokio::test]
    async fn test_failure_hides_details() {
        let response = InsightsFailure(RepositoryError::DataCorruption(
            "secret table layout".to_string(),
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], INSIGHTS_FAILURE_MESSAGE);
        assert!(!String::from_utf8_lossy(&body).contains("secret"));
    }

    #[test]
    fn test_compute_with_empty_catalog() {
        let report = compute(&[], &InteractionTally::default(), FallbackPolicy::Simulate);
        assert!(report.performance.is_empty());
        assert!(report.anomalies.is_empty());
        assert_eq!(report.forecast.len(), 3);
        assert_eq!(report.forecast[0].revenue, 56_000);
    }
}
