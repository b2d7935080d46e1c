//! Restwell CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! rw-cli migrate storefront
//!
//! # Run admin database migrations
//! rw-cli migrate admin
//!
//! # Run all database migrations
//! rw-cli migrate all
//!
//! # Create admin user
//! rw-cli admin create -e admin@example.com -n "Admin Name" -r super_admin -p 'long-passphrase'
//!
//! # Seed demo catalog and traffic
//! rw-cli seed demo --products 8 --events 1000
//!
//! # Print the catalog
//! rw-cli products list --category mattress
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "rw-cli")]
#[command(author, version, about = "Restwell CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the database
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
    /// Inspect the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run storefront database migrations
    Storefront,
    /// Run admin database migrations
    Admin,
    /// Run all database migrations
    All,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Admin role (`super_admin`, `admin`, `viewer`)
        #[arg(short, long, default_value = "admin")]
        role: String,

        /// Initial password (at least 12 characters)
        #[arg(short, long, env = "RW_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Subcommand)]
enum SeedAction {
    /// Insert demo products and random interaction events
    Demo {
        /// Number of products to create
        #[arg(long, default_value_t = 8)]
        products: usize,

        /// Number of interaction events to create
        #[arg(long, default_value_t = 1000)]
        events: usize,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// Print the catalog as JSON
    List {
        /// Only products in this category
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Storefront => commands::migrate::storefront().await?,
            MigrateTarget::Admin => commands::migrate::admin().await?,
            MigrateTarget::All => {
                commands::migrate::storefront().await?;
                commands::migrate::admin().await?;
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                role,
                password,
            } => {
                commands::admin::create_user(&email, &name, &role, &password).await?;
            }
        },
        Commands::Seed { action } => match action {
            SeedAction::Demo { products, events } => {
                commands::seed::demo(products, events).await?;
            }
        },
        Commands::Products { action } => match action {
            ProductsAction::List { category } => {
                commands::products::list(category.as_deref()).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_seed_defaults() {
        let cli = Cli::try_parse_from(["rw-cli", "seed", "demo"]).unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Commands::Seed {
                action: SeedAction::Demo {
                    products: 8,
                    events: 1000
                }
            }
        ));
    }
}
