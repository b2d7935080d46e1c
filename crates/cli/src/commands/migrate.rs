//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront migrations (catalog schema)
//! rw-cli migrate storefront
//!
//! # Run admin migrations (admin schema)
//! rw-cli migrate admin
//!
//! # Run all migrations
//! rw-cli migrate all
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string for storefront
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string for admin
//!
//! Both fall back to `DATABASE_URL`. The two sets share one migrations table
//! when they point at the same database, so each migrator ignores versions
//! it does not own.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use thiserror::Error;

use super::database_url;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run storefront database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the URL is missing or a migration fails.
pub async fn storefront() -> Result<(), MigrationError> {
    run(
        "storefront",
        "STOREFRONT_DATABASE_URL",
        sqlx::migrate!("../storefront/migrations"),
    )
    .await
}

/// Run admin database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the URL is missing or a migration fails.
pub async fn admin() -> Result<(), MigrationError> {
    run(
        "admin",
        "ADMIN_DATABASE_URL",
        sqlx::migrate!("../admin/migrations"),
    )
    .await
}

async fn run(
    target: &str,
    env_var: &'static str,
    mut migrator: Migrator,
) -> Result<(), MigrationError> {
    let url = database_url(env_var).ok_or(MigrationError::MissingEnvVar(env_var))?;

    tracing::info!("Connecting to {target} database...");
    let pool = PgPool::connect(url.expose_secret()).await?;

    tracing::info!(migrations = migrator.iter().count(), "Running {target} migrations...");
    migrator.set_ignore_missing(true);
    migrator.run(&pool).await?;

    tracing::info!("{target} migrations complete");
    Ok(())
}
