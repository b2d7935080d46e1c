//! Shopper interaction events.
//!
//! Events are append-only: the storefront records one row per tracked action
//! and nothing ever updates or deletes them. Analytics derives all of its
//! per-product counts from this log at query time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{InteractionId, ProductId, UserId};

/// The kind of action a shopper performed on a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "catalog.interaction_kind", rename_all = "kebab-case")
)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionKind {
    View,
    Click,
    AddToCart,
    Purchase,
}

impl InteractionKind {
    /// All kinds, in funnel order.
    pub const ALL: [Self; 4] = [Self::View, Self::Click, Self::AddToCart, Self::Purchase];

    /// Wire name, as stored and as sent by clients.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Click => "click",
            Self::AddToCart => "add-to-cart",
            Self::Purchase => "purchase",
        }
    }
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known interaction kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown interaction type: {0}")]
pub struct ParseInteractionKindError(pub String);

impl std::str::FromStr for InteractionKind {
    type Err = ParseInteractionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseInteractionKindError(s.to_owned()))
    }
}

/// A logged shopper action against exactly one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEvent {
    pub id: InteractionId,
    pub product_id: ProductId,
    /// Set when a signed-in customer performed the action; guests are anonymous.
    pub user_id: Option<UserId>,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub occurred_at: DateTime<Utc>,
    pub session_id: Option<String>,
}
