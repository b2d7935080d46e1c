//! Catalog inspection commands.

use restwell_storefront::db::{self, ProductRepository};

use super::database_url;

/// Print the catalog as pretty JSON.
///
/// # Errors
///
/// Returns an error if `STOREFRONT_DATABASE_URL` is missing or the query fails.
pub async fn list(category: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let url = database_url("STOREFRONT_DATABASE_URL")
        .ok_or("STOREFRONT_DATABASE_URL not set")?;
    let pool = db::create_pool(&url).await?;

    let products = ProductRepository::new(&pool).list(category).await?;
    tracing::info!(count = products.len(), "Loaded products");

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&products)?);
    }

    Ok(())
}
