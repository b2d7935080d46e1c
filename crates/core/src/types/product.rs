//! Catalog product.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A catalog product as seen by listings and the analytics aggregator.
///
/// `num_reviews` doubles as the sales count in analytics; the store has no
/// order ledger of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub num_reviews: i32,
}

impl Product {
    /// Name shown when a stored product has an empty name.
    pub const UNKNOWN_NAME: &'static str = "Unknown Product";
    /// Category used when a stored product has no category.
    pub const DEFAULT_CATEGORY: &'static str = "other";

    /// Build a product, substituting display defaults for blank fields and
    /// clamping a negative review count to zero.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Decimal,
        num_reviews: i32,
    ) -> Self {
        let name = name.into();
        let category = category.into();
        Self {
            id,
            name: if name.trim().is_empty() {
                Self::UNKNOWN_NAME.to_owned()
            } else {
                name
            },
            category: if category.trim().is_empty() {
                Self::DEFAULT_CATEGORY.to_owned()
            } else {
                category
            },
            price,
            num_reviews: num_reviews.max(0),
        }
    }

    /// Sales proxy used by analytics.
    #[must_use]
    pub fn sales(&self) -> u32 {
        self.num_reviews.unsigned_abs()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_get_defaults() {
        let product = Product::new(ProductId::new(1), "  ", "", Decimal::new(19_999, 2), -3);
        assert_eq!(product.name, "Unknown Product");
        assert_eq!(product.category, "other");
        assert_eq!(product.num_reviews, 0);
        assert_eq!(product.sales(), 0);
    }

    #[test]
    fn test_serializes_camel_case_with_numeric_price() {
        let product = Product::new(
            ProductId::new(7),
            "Cloud Hybrid",
            "mattress",
            Decimal::new(89_900, 2),
            12,
        );
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["numReviews"], 12);
        assert_eq!(json["price"], 899.0);
        assert_eq!(json["id"], 7);
    }
}
