//! # ecocart-core: Pure Cart/Catalog Engine for EcoCart
//!
//! This crate is the **heart** of EcoCart. It owns the cart rules, the
//! derived cart aggregates and the catalog queries, as pure code with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         EcoCart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (CLI / web front end)              │   │
//! │  │     Search ──► Compare ──► Add to cart ──► Cart totals          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ ecocart-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │   types   │  │  impact   │  │   │
//! │  │   │  filter   │  │ add/remove│  │  Product  │  │  miles    │  │   │
//! │  │   │  compare  │  │  totals   │  │  CartItem │  │  trees    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  ecocart-db (Storage Layer)                     │   │
//! │  │          key-value slot for the cart, catalog file loading      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, FootprintTier, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The cart engine
//! - [`catalog`] - The catalog resolver
//! - [`impact`] - Everyday equivalents for footprint figures
//! - [`validation`] - Catalog integrity checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use ecocart_core::{Cart, Catalog, FootprintTier};
//!
//! let catalog = Catalog::from_json(r#"[
//!   {"id": 1, "name": "Cotton Shirt", "category": "Clothing", "price": 25.0,
//!    "carbonFootprint": 20.0, "description": "Classic tee", "alternatives": [2]},
//!   {"id": 2, "name": "Organic Shirt", "category": "Clothing", "price": 30.0,
//!    "carbonFootprint": 5.0, "description": "Organic cotton tee", "alternatives": []}
//! ]"#).unwrap();
//!
//! let shirt = catalog.get(1.into()).unwrap();
//! let greener = catalog.best_alternative(shirt).unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add_item(shirt, Some(greener));
//!
//! assert_eq!(cart.total_price().cents(), 3000);
//! assert_eq!(cart.carbon_savings(), 15.0);
//! assert_eq!(FootprintTier::classify(greener.carbon_footprint), FootprintTier::Low);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod impact;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals};
pub use catalog::{Catalog, CatalogFilter, Comparison};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart is persisted under.
///
/// A single named blob; the storage layer may be pointed at another key,
/// but every EcoCart front end uses this one by default.
pub const CART_STORAGE_KEY: &str = "ecocart-storage";

/// Upper bound (inclusive) of the Low footprint tier, in kg CO₂e.
pub const LOW_FOOTPRINT_MAX_KG: f64 = 5.0;

/// Upper bound (inclusive) of the Medium footprint tier, in kg CO₂e.
pub const MEDIUM_FOOTPRINT_MAX_KG: f64 = 15.0;
