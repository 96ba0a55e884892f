//! # State Module
//!
//! Application state for the CLI.
//!
//! Each command takes only the state it needs, so catalog queries never
//! touch the cart lock and cart commands never re-read the catalog file.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────┬──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌────────────────┐  ┌──────────────────┐            │
//! │  │ CatalogState │  │   CartState    │  │   ConfigState    │            │
//! │  │              │  │                │  │                  │            │
//! │  │  Arc<        │  │  Mutex<Cart>   │  │  db_path         │            │
//! │  │   Catalog>   │  │  CartRepository│  │  catalog_path    │            │
//! │  │              │  │  watch::Sender │  │  storage_key     │            │
//! │  └──────────────┘  └────────────────┘  └──────────────────┘            │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: immutable after load, shared by Arc                   │
//! │  • CartState: tokio Mutex held across the save                         │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;

pub use cart::CartState;
pub use catalog::CatalogState;
pub use config::ConfigState;
