//! Catalog CLI - Command-line console for the product catalog.
//!
//! # Usage
//!
//! ```bash
//! # List products, newest first
//! catalog-cli products list
//!
//! # Create a product
//! catalog-cli products create --name "Landing Kit" --description "..." \
//!     --price 19.99 --image-url https://cdn.example.com/kit.png \
//!     --file-url https://cdn.example.com/kit.zip --category 3 \
//!     --features "Responsive Design, Dark Mode"
//!
//! # Change the price of product 7
//! catalog-cli products update 7 --price 14.99
//!
//! # Delete product 7 (asks for confirmation unless --yes)
//! catalog-cli products delete 7
//!
//! # List categories
//! catalog-cli categories list
//! ```
//!
//! # Environment Variables
//!
//! See `catalog_admin::config` for the store settings. `RUST_LOG` controls
//! verbosity and `LOG_FORMAT=json` switches to structured output.

#![cfg_attr(not(test), forbid(unsafe_code))]

use catalog_admin::{AdminConfig, AppError, RestStore};
use catalog_admin_core::ProductId;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::products::ProductFields;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(version, about = "Product catalog admin console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Browse categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List all products, newest first
    List,
    /// Create a new product
    Create {
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Replace a product with its current values plus the given changes
    Update {
        /// Product ID
        id: ProductId,

        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: ProductId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// List all categories
    List,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing with `EnvFilter`, as JSON when `LOG_FORMAT=json`.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "catalog_admin=info,catalog_cli=info".into());

    let is_json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = is_json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_json).then(|| tracing_subscriber::fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = AdminConfig::from_env()?;
    let store = RestStore::new(&config.store)?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list(&store).await,
            ProductAction::Create { fields } => commands::products::create(&store, &fields).await,
            ProductAction::Update { id, fields } => {
                commands::products::update(&store, id, &fields).await
            }
            ProductAction::Delete { id, yes } => {
                commands::products::delete(&store, id, yes).await
            }
        },
        Commands::Categories { action } => match action {
            CategoryAction::List => commands::categories::list(&store).await,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use catalog_admin_core::FieldUpdate;

    use super::*;

    #[test]
    fn test_create_flags_take_explicit_booleans() {
        let cli = Cli::try_parse_from([
            "catalog-cli",
            "products",
            "create",
            "--name",
            "Kit",
            "--active",
            "false",
            "--featured",
            "true",
            "--live-demo",
            "true",
        ])
        .unwrap();

        let Commands::Products {
            action: ProductAction::Create { fields },
        } = cli.command
        else {
            panic!("expected products create");
        };
        assert_eq!(
            fields.updates(),
            vec![
                FieldUpdate::Name("Kit".to_string()),
                FieldUpdate::IsActive(false),
                FieldUpdate::IsFeatured(true),
                FieldUpdate::HasLiveDemo(true),
            ]
        );
    }

    #[test]
    fn test_update_accepts_no_field_options() {
        let cli = Cli::try_parse_from(["catalog-cli", "products", "update", "7"]).unwrap();

        let Commands::Products {
            action: ProductAction::Update { id, fields },
        } = cli.command
        else {
            panic!("expected products update");
        };
        assert_eq!(id, ProductId::new(7));
        assert!(fields.updates().is_empty());
    }

    #[test]
    fn test_boolean_flags_require_a_value() {
        assert!(Cli::try_parse_from(["catalog-cli", "products", "create", "--featured"]).is_err());
        assert!(Cli::try_parse_from(["catalog-cli", "products", "create", "--inactive"]).is_err());
    }
}
