//! # Command Line
//!
//! The clap surface of the `ecocart` binary, and the dispatch from a parsed
//! subcommand to its command function.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use ecocart_core::{FootprintTier, ProductId};
use serde::Serialize;

use crate::commands;
use crate::error::ApiError;
use crate::render;
use crate::App;

#[derive(Parser, Debug)]
#[command(
    name = "ecocart",
    version,
    about = "Shop a product catalog by carbon footprint"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print responses as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// SQLite file holding the saved cart [env: ECOCART_DB_PATH]
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Catalog JSON file [env: ECOCART_CATALOG_PATH]
    #[arg(long, value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Key the cart is saved under [env: ECOCART_STORAGE_KEY]
    #[arg(long, value_name = "KEY", global = true)]
    pub storage_key: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List product categories
    Categories,
    /// Search the catalog
    Search {
        /// Text to find in name, description or category
        #[arg(short, long, default_value = "")]
        query: String,
        /// Only these categories (repeatable, exact match)
        #[arg(short, long = "category", value_name = "CATEGORY")]
        categories: Vec<String>,
        /// Only this footprint tier (low, medium, high)
        #[arg(short, long)]
        tier: Option<FootprintTier>,
    },
    /// Show one product and its alternatives
    Show { id: u32 },
    /// Compare a product with its greener alternatives
    Compare { id: u32 },
    /// Catalog-wide savings summary
    Overview,
    /// Show the cart
    Cart,
    /// Add one unit of a product to the cart
    Add {
        id: u32,
        /// Buy this listed alternative instead
        #[arg(short, long, value_name = "ID")]
        alternative: Option<u32>,
    },
    /// Remove a product from the cart
    Remove { id: u32 },
    /// Set a product's quantity (0 or less removes it)
    SetQuantity {
        id: u32,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

/// Runs one subcommand and renders its response.
pub async fn dispatch(app: &App, command: Command, json: bool) -> Result<String, ApiError> {
    match command {
        Command::Categories => {
            let categories = commands::catalog::list_categories(&app.catalog);
            output(&categories, json, |c| render::categories(c))
        }
        Command::Search {
            query,
            categories,
            tier,
        } => {
            let products =
                commands::catalog::search_products(&app.catalog, &query, &categories, tier);
            output(&products, json, |p| render::product_list(p))
        }
        Command::Show { id } => {
            let detail = commands::catalog::get_product(&app.catalog, ProductId(id))?;
            output(&detail, json, render::product_detail)
        }
        Command::Compare { id } => {
            let comparison = commands::catalog::compare_product(&app.catalog, ProductId(id))?;
            output(&comparison, json, render::comparison)
        }
        Command::Overview => {
            let overview = commands::catalog::catalog_overview(&app.catalog);
            output(&overview, json, render::overview)
        }
        Command::Cart => {
            let cart = commands::cart::get_cart(&app.cart).await;
            output(&cart, json, render::cart)
        }
        Command::Add { id, alternative } => {
            let cart = commands::cart::add_to_cart(
                &app.catalog,
                &app.cart,
                ProductId(id),
                alternative.map(ProductId),
            )
            .await?;
            output(&cart, json, render::cart)
        }
        Command::Remove { id } => {
            let cart = commands::cart::remove_from_cart(&app.cart, ProductId(id)).await?;
            output(&cart, json, render::cart)
        }
        Command::SetQuantity { id, quantity } => {
            let cart =
                commands::cart::update_cart_item(&app.cart, ProductId(id), quantity).await?;
            output(&cart, json, render::cart)
        }
        Command::Clear => {
            let cart = commands::cart::clear_cart(&app.cart).await?;
            output(&cart, json, render::cart)
        }
    }
}

fn output<T, F>(value: &T, json: bool, text: F) -> Result<String, ApiError>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text(value))
    }
}
