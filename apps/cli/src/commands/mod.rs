//! # Commands Module
//!
//! Every operation the `ecocart` binary exposes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Browse, search, compare
//! └── cart.rs     ◄─── Cart manipulation
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ ecocart search --query shirt --tier low                             │
//! │         │                                                               │
//! │         │ (clap parses into Command::Search)                            │
//! │         ▼                                                               │
//! │  commands::catalog::search_products(                                    │
//! │      &catalog,                ◄── Only the state it needs               │
//! │      "shirt", &[], Some(Low),                                           │
//! │  ) -> Vec<ProductDto>                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  render:: text table, or serde_json with --json                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! ```rust,ignore
//! // Only needs the catalog
//! fn search_products(catalog: &CatalogState, ...)
//!
//! // Only needs the cart
//! async fn get_cart(cart: &CartState)
//!
//! // Needs both
//! async fn add_to_cart(catalog: &CatalogState, cart: &CartState, ...)
//! ```

pub mod cart;
pub mod catalog;
