//! Festify CLI - Catalog and cart tools.
//!
//! # Usage
//!
//! ```bash
//! # Validate a catalog file
//! festify-cli catalog check --path catalog.json
//!
//! # List the bundled catalog
//! festify-cli catalog list
//!
//! # Price an order: two units of product 1 and one of product 3
//! festify-cli quote 1 1 3
//! ```
//!
//! # Commands
//!
//! - `catalog check` - Validate a catalog file
//! - `catalog list` - Print every product
//! - `quote` - Build a cart from product ids and print its totals
//!
//! Without `--path`, commands use `FESTIFY_CATALOG_PATH` if set, otherwise
//! the catalog bundled with the storefront.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use festify_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "festify-cli")]
#[command(author, version, about = "Festify CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Price a cart built from product ids (repeat an id to add more units)
    Quote {
        /// Catalog file (defaults to the bundled catalog)
        #[arg(short, long, env = "FESTIFY_CATALOG_PATH")]
        path: Option<PathBuf>,

        /// Product ids to add, in order
        #[arg(required = true)]
        product_ids: Vec<ProductId>,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Validate a catalog file
    Check {
        /// Catalog file (defaults to the bundled catalog)
        #[arg(short, long, env = "FESTIFY_CATALOG_PATH")]
        path: Option<PathBuf>,
    },
    /// List every product in catalog order
    List {
        /// Catalog file (defaults to the bundled catalog)
        #[arg(short, long, env = "FESTIFY_CATALOG_PATH")]
        path: Option<PathBuf>,
    },
}

fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Command output goes through tracing, so default to info
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Check { path } => commands::catalog::check(path.as_deref())?,
            CatalogAction::List { path } => commands::catalog::list(path.as_deref())?,
        },
        Commands::Quote { path, product_ids } => {
            commands::quote::quote(path.as_deref(), &product_ids)?;
        }
    }
    Ok(())
}
