//! Read access to the catalog and interaction log.
//!
//! The admin service never writes these tables; the storefront owns them.

use rust_decimal::Decimal;
use sqlx::PgPool;

use restwell_core::{InteractionKind, Product, ProductId};

use super::RepositoryError;
use crate::services::insights::InteractionTally;

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    category: String,
    price: Decimal,
    num_reviews: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self::new(
            ProductId::new(row.id),
            row.name,
            row.category,
            row.price,
            row.num_reviews,
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InteractionCountRow {
    product_id: i32,
    kind: InteractionKind,
    count: i64,
}

/// Repository for catalog reads.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All products in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, category, price, num_reviews
            FROM catalog.product
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Per-product, per-kind interaction counts over the whole log.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a count is negative.
    pub async fn interaction_tally(&self) -> Result<InteractionTally, RepositoryError> {
        let rows = sqlx::query_as::<_, InteractionCountRow>(
            r"
            SELECT product_id, kind, COUNT(*) AS count
            FROM catalog.interaction
            GROUP BY product_id, kind
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let counts = rows
            .into_iter()
            .map(|row| {
                let count = u32::try_from(row.count).map_err(|_| {
                    RepositoryError::DataCorruption(format!(
                        "interaction count out of range for product {}: {}",
                        row.product_id, row.count
                    ))
                })?;
                Ok((ProductId::new(row.product_id), row.kind, count))
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok(InteractionTally::from_counts(counts))
    }
}
