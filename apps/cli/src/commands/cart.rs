//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart   ┌──────────┐                              │
//! │  │  Empty   │───────────────►│ In Cart  │◄──┐ add_to_cart              │
//! │  │  Cart    │                │          │───┘ update_cart_item         │
//! │  └──────────┘                └──────────┘     remove_from_cart         │
//! │       ▲                           │                                     │
//! │       │         clear_cart        │                                     │
//! │       └───────────────────────────┘                                     │
//! │                                                                         │
//! │  Every transition is saved before the command returns, so the next     │
//! │  `ecocart` invocation starts from the same cart.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`toggle_cart`] has no subcommand. The panel flag only lives as long as
//! the process, so it is there for front ends that embed this library.

use ecocart_core::{Cart, CartItem, CartTotals, ProductId};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartState, CatalogState};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
    pub is_open: bool,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
            is_open: cart.is_open(),
        }
    }
}

/// Gets the current cart contents.
///
/// ## Output
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │  CART                                          3 items         │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Organic T-Shirt (for Cotton T-Shirt)  x2   $59.98  -30.0 kg   │
/// │  Steel Bottle                          x1   $24.00             │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Total                                      $83.98             │
/// │  Footprint                                  12.0 kg CO₂e       │
/// │  Saved                                      30.0 kg CO₂e       │
/// └────────────────────────────────────────────────────────────────┘
/// ```
pub async fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c)).await
}

/// Adds one unit of a product, optionally swapped for an alternative.
///
/// ## Behavior
/// - Same product and same alternative already in cart: quantity + 1
/// - Otherwise: a new line with quantity 1
///
/// ## Validation
/// ```text
/// product_id in catalog? ──── no ──► NOT_FOUND
///        │ yes
///        ▼
/// alternative_id given?  ──── no ──► add plain line
///        │ yes
///        ▼
/// alternative in catalog? ─── no ──► NOT_FOUND
///        │ yes
///        ▼
/// listed by the product? ──── no ──► VALIDATION_ERROR
///        │ yes
///        ▼
/// add upgraded line
/// ```
pub async fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    product_id: ProductId,
    alternative_id: Option<ProductId>,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, alternative_id = ?alternative_id, "add_to_cart command");

    let catalog = catalog.inner();
    let product = catalog
        .get(product_id)
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    let alternative = match alternative_id {
        Some(alt_id) => {
            let alternative = catalog
                .get(alt_id)
                .ok_or_else(|| ApiError::not_found("Product", alt_id))?;
            if !product.lists_alternative(alt_id) {
                return Err(ApiError::validation(format!(
                    "{} is not an alternative to {}",
                    alternative.name, product.name
                )));
            }
            Some(alternative)
        }
        None => None,
    };

    let response = cart
        .mutate(|c| {
            c.add_item(product, alternative);
            CartResponse::from(&*c)
        })
        .await?;

    Ok(response)
}

/// Removes every line of a product, whatever alternative it carries.
///
/// Unknown ids leave the cart unchanged.
pub async fn remove_from_cart(
    cart: &CartState,
    product_id: ProductId,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");

    let response = cart
        .mutate(|c| {
            c.remove_item(product_id);
            CartResponse::from(&*c)
        })
        .await?;

    Ok(response)
}

/// Sets the quantity of a product's lines.
///
/// ## Behavior
/// - Quantity ≤ 0: removes the product's lines
/// - Otherwise: every line of that product gets the new quantity
/// - Product not in cart: no change
pub async fn update_cart_item(
    cart: &CartState,
    product_id: ProductId,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    let response = cart
        .mutate(|c| {
            c.update_quantity(product_id, quantity);
            CartResponse::from(&*c)
        })
        .await?;

    Ok(response)
}

/// Empties the cart.
pub async fn clear_cart(cart: &CartState) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");

    let response = cart
        .mutate(|c| {
            c.clear();
            CartResponse::from(&*c)
        })
        .await?;

    Ok(response)
}

/// Opens or closes the cart panel. Returns the new state.
pub async fn toggle_cart(cart: &CartState) -> bool {
    debug!("toggle_cart command");
    cart.toggle().await
}
