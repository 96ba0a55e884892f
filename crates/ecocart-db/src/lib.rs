//! # ecocart-db: Storage Layer for EcoCart
//!
//! Everything in EcoCart that touches disk: the SQLite slot the cart is
//! persisted in, and the JSON file the catalog is read from.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        EcoCart Data Flow                                │
//! │                                                                         │
//! │  CLI command (add, remove, set-quantity, ...)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    ecocart-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ CartRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ KvRepo        │    │ 001_kv_store │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐                                            │   │
//! │  │   │ catalog_file  │ ← products.json → ecocart_core::Catalog   │   │
//! │  │   └───────────────┘                                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/ecocart/ecocart.db                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - Key-value and cart repositories
//! - [`catalog_file`] - Catalog file loading
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ecocart_db::{load_catalog, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("ecocart.db")).await?;
//! let catalog = load_catalog("data/products.json").await?;
//!
//! let carts = db.carts();
//! let mut cart = carts.load_or_empty().await;
//! cart.add_item(catalog.get(1.into()).unwrap(), None);
//! carts.save(&cart).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog_file;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog_file::load_catalog;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::cart::CartRepository;
pub use repository::kv::{KvEntry, KvRepository};
