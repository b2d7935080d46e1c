//! CLI subcommand implementations.

pub mod admin;
pub mod migrate;
pub mod products;
pub mod seed;

use secrecy::SecretString;

/// Read a database URL, falling back to `DATABASE_URL` when `primary` is unset.
///
/// Loads `.env` first.
pub fn database_url(primary: &'static str) -> Option<SecretString> {
    dotenvy::dotenv().ok();
    std::env::var(primary)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}
