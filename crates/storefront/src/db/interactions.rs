//! Interaction log repository.
//!
//! Insert-only. Rows are never updated or deleted here; they go away only
//! when their product is deleted.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use restwell_core::{InteractionEvent, InteractionId, InteractionKind, ProductId, UserId};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct InteractionRow {
    id: i64,
    product_id: i32,
    user_id: Option<i32>,
    kind: InteractionKind,
    occurred_at: DateTime<Utc>,
    session_id: Option<String>,
}

impl From<InteractionRow> for InteractionEvent {
    fn from(row: InteractionRow) -> Self {
        Self {
            id: InteractionId::new(row.id),
            product_id: ProductId::new(row.product_id),
            user_id: row.user_id.map(UserId::new),
            kind: row.kind,
            occurred_at: row.occurred_at,
            session_id: row.session_id,
        }
    }
}

/// An interaction to record.
#[derive(Debug, Clone)]
pub struct NewInteraction {
    pub product_id: ProductId,
    pub user_id: Option<UserId>,
    pub kind: InteractionKind,
    pub session_id: Option<String>,
    /// Defaults to the database clock when `None`.
    pub occurred_at: Option<DateTime<Utc>>,
}

/// Repository for the interaction log.
pub struct InteractionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InteractionRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append one event to the log.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` if the insert fails otherwise.
    pub async fn record(
        &self,
        interaction: &NewInteraction,
    ) -> Result<InteractionEvent, RepositoryError> {
        let row = sqlx::query_as::<_, InteractionRow>(
            r"
            INSERT INTO catalog.interaction (product_id, user_id, kind, session_id, occurred_at)
            VALUES ($1, $2, $3, $4, COALESCE($5, NOW()))
            RETURNING id, product_id, user_id, kind, occurred_at, session_id
            ",
        )
        .bind(interaction.product_id)
        .bind(interaction.user_id)
        .bind(interaction.kind)
        .bind(interaction.session_id.as_deref())
        .bind(interaction.occurred_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                RepositoryError::NotFound
            }
            other => RepositoryError::Database(other),
        })?;

        Ok(row.into())
    }
}
