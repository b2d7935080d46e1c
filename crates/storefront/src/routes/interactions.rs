//! Interaction tracking.
//!
//! The storefront client posts one event per tracked shopper action. Events
//! feed the admin insights report.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use restwell_core::{InteractionEvent, InteractionKind, ProductId, UserId};

use crate::db::{InteractionRepository, NewInteraction, RepositoryError};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Longest accepted client session identifier.
pub const MAX_SESSION_ID_LEN: usize = 128;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/products/{id}/interactions", post(track))
}

/// Tracking request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub session_id: Option<String>,
    pub user_id: Option<UserId>,
}

#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub success: bool,
    pub interaction: InteractionEvent,
}

impl TrackRequest {
    /// Validate and convert into a row to insert.
    fn into_new_interaction(self, product_id: ProductId) -> Result<NewInteraction> {
        let session_id = self
            .session_id
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());

        if session_id
            .as_ref()
            .is_some_and(|s| s.chars().count() > MAX_SESSION_ID_LEN)
        {
            return Err(AppError::BadRequest(format!(
                "sessionId must be at most {MAX_SESSION_ID_LEN} characters"
            )));
        }

        Ok(NewInteraction {
            product_id,
            user_id: self.user_id,
            kind: self.kind,
            session_id,
            occurred_at: None,
        })
    }
}

/// POST /api/products/{id}/interactions
#[instrument(skip_all, fields(product_id = id))]
async fn track(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: std::result::Result<Json<TrackRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TrackResponse>)> {
    let Json(body) = body?;
    let new = body.into_new_interaction(ProductId::new(id))?;

    let interaction = InteractionRepository::new(state.pool())
        .record(&new)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("product {id}")),
            other => AppError::Database(other),
        })?;

    add_breadcrumb(
        "interaction",
        "Recorded interaction",
        Some(&[
            ("product_id", &id.to_string()),
            ("type", interaction.kind.as_str()),
        ]),
    );
    tracing::debug!(kind = %interaction.kind, interaction_id = %interaction.id, "Interaction recorded");

    Ok((
        StatusCode::CREATED,
        Json(TrackResponse {
            success: true,
            interaction,
        }),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(json: &str) -> TrackRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_body_uses_wire_names() {
        let body = request(r#"{"type":"add-to-cart","sessionId":"abc","userId":9}"#);
        assert_eq!(body.kind, InteractionKind::AddToCart);
        assert_eq!(body.session_id.as_deref(), Some("abc"));
        assert_eq!(body.user_id, Some(UserId::new(9)));
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(serde_json::from_str::<TrackRequest>(r#"{"type":"wishlist"}"#).is_err());
    }

    #[test]
    fn test_blank_session_id_dropped() {
        let new = request(r#"{"type":"view","sessionId":"   "}"#)
            .into_new_interaction(ProductId::new(1))
            .unwrap();
        assert_eq!(new.session_id, None);
        assert_eq!(new.user_id, None);
        assert_eq!(new.product_id, ProductId::new(1));
    }

    #[test]
    fn test_long_session_id_rejected() {
        let long = "s".repeat(MAX_SESSION_ID_LEN + 1);
        let body = TrackRequest {
            kind: InteractionKind::Click,
            session_id: Some(long),
            user_id: None,
        };
        let err = body.into_new_interaction(ProductId::new(1)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_session_id_limit_counts_characters() {
        // 128 characters, 256 bytes
        let wide = "é".repeat(MAX_SESSION_ID_LEN);
        let body = TrackRequest {
            kind: InteractionKind::View,
            session_id: Some(wide.clone()),
            user_id: None,
        };
        let new = body.into_new_interaction(ProductId::new(1)).unwrap();
        assert_eq!(new.session_id, Some(wide));
    }
}
