//! # Cart Engine
//!
//! Owns the cart's lines and answers point-in-time aggregate queries.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation                      Keyed by              Effect           │
//! │  ─────────                      ────────              ──────           │
//! │                                                                         │
//! │  add_item(P, alt?) ───────────► (P.id, alt?.id) ────► qty += 1 / push  │
//! │                                                                         │
//! │  remove_item(id) ─────────────► product id only ────► drop ALL lines   │
//! │                                                                         │
//! │  update_quantity(id, n) ──────► product id only ────► n ≤ 0: remove    │
//! │                                                       else qty = n     │
//! │                                                                         │
//! │  clear() ─────────────────────► -                ───► items.clear()    │
//! │                                                                         │
//! │  toggle() ────────────────────► -                ───► is_open = !is_open│
//! │                                                                         │
//! │  NOTE: add/merge is alternative-aware, remove/update are not.          │
//! │        A product held plain AND upgraded is removed/updated as one.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Every line has `quantity >= 1`
//! - At most one line per [`LineKey`]
//! - Totals are computed from the lines on every call; nothing is cached
//! - Quantity and money arithmetic saturates at the `i64` bounds, so no
//!   input can make an operation panic
//!
//! The engine trusts its input: a `selected_alternative` that is not one of
//! the product's listed alternatives is kept as given. Checking that is the
//! caller's job.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::impact;
use crate::money::Money;
use crate::types::{CartItem, LineKey, Product, ProductId};

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,

    /// Cart panel visibility. Plain UI bookkeeping, never persisted.
    is_open: bool,
}

impl Cart {
    /// Creates a new empty, closed cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuilds a cart from stored lines.
    ///
    /// ## Normalization
    /// Stored data is not trusted to uphold the invariants:
    /// - lines with `quantity < 1` are dropped
    /// - lines sharing a key are merged, quantities summed (saturating),
    ///   first position kept
    pub fn restore(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            if item.quantity < 1 {
                continue;
            }
            let key = item.key();
            match cart.items.iter_mut().find(|existing| existing.key() == key) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity)
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of `product`, optionally bought as `alternative`.
    ///
    /// ## Behavior
    /// - Line with the same (product, alternative) key exists: quantity + 1
    /// - Otherwise: appends a new line with quantity 1
    ///
    /// The same product under a different alternative choice is a separate
    /// line.
    pub fn add_item(&mut self, product: &Product, alternative: Option<&Product>) {
        let key = LineKey::new(product, alternative);

        if let Some(item) = self.items.iter_mut().find(|i| i.key() == key) {
            item.quantity = item.quantity.saturating_add(1);
            return;
        }

        self.items.push(CartItem::new(product, alternative));
    }

    /// Removes every line for `product_id`, whatever alternative it carries.
    ///
    /// Removing an id that is not in the cart is a no-op.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Sets the quantity of every line for `product_id`.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: identical to [`Cart::remove_item`]
    /// - Otherwise: every line with that base product gets `quantity`,
    ///   plain and upgraded alike
    /// - Product not in cart: no-op
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        self.items
            .iter_mut()
            .filter(|i| i.product.id == product_id)
            .for_each(|i| i.quantity = quantity);
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Flips the cart panel visibility.
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    // =========================================================================
    // Aggregates
    // =========================================================================

    /// Sum of line totals, pricing each line at its alternative if chosen.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of line footprints (kg CO₂e), using the alternative's if chosen.
    pub fn total_carbon_footprint(&self) -> f64 {
        self.items.iter().map(CartItem::line_footprint).sum()
    }

    /// Total units across lines (not the number of lines).
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, i| total.saturating_add(i.quantity))
    }

    /// Footprint avoided by the chosen alternatives (kg CO₂e).
    ///
    /// Lines without an alternative contribute zero. The result is a plain
    /// arithmetic reduction and can be negative.
    pub fn carbon_savings(&self) -> f64 {
        self.items.iter().map(CartItem::line_savings).sum()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Looks up a single line by its identity key.
    pub fn line(&self, key: &LineKey) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.key() == key)
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }
}

/// Cart totals summary for responses and observers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    #[ts(type = "number")]
    pub line_count: usize,
    #[ts(type = "number")]
    pub total_items: i64,
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub total_price: Money,
    pub total_carbon_footprint: f64,
    pub carbon_savings: f64,
    /// Car miles with the same footprint as the cart.
    pub driving_miles: f64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        let footprint = cart.total_carbon_footprint();
        CartTotals {
            line_count: cart.line_count(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
            total_carbon_footprint: footprint,
            carbon_savings: cart.carbon_savings(),
            driving_miles: impact::driving_miles(footprint),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: u32, price_cents: i64, footprint: f64) -> Product {
        Product {
            id: ProductId(id),
            name: format!("Product {}", id),
            category: "Test".to_string(),
            image: None,
            price: Money::from_cents(price_cents),
            carbon_footprint: footprint,
            description: String::new(),
            alternatives: Vec::new(),
        }
    }

    /// A cart holding product 1 plain and upgraded to 2, plus product 3.
    fn mixed_cart() -> Cart {
        let p1 = test_product(1, 1000, 20.0);
        let p2 = test_product(2, 1200, 5.0);
        let p3 = test_product(3, 500, 8.0);

        let mut cart = Cart::new();
        cart.add_item(&p1, None);
        cart.add_item(&p1, Some(&p2));
        cart.add_item(&p1, Some(&p2));
        cart.add_item(&p3, None);
        cart
    }

    #[test]
    fn test_add_single_item_totals() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 1000, 8.0), None);

        assert_eq!(cart.total_price(), Money::from_cents(1000));
        assert_eq!(cart.total_carbon_footprint(), 8.0);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let product = test_product(1, 999, 3.0);
        let alt = test_product(2, 1099, 1.0);

        for calls in 1..=5 {
            let mut cart = Cart::new();
            for _ in 0..calls {
                cart.add_item(&product, Some(&alt));
            }
            assert_eq!(cart.line_count(), 1);
            assert_eq!(cart.items()[0].quantity, calls);
        }
    }

    #[test]
    fn test_plain_and_upgraded_are_distinct_lines() {
        let p = test_product(1, 1000, 20.0);
        let a = test_product(2, 1200, 5.0);

        let mut cart = Cart::new();
        cart.add_item(&p, None);
        cart.add_item(&p, Some(&a));

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total_items(), 2);
        assert!(cart.line(&LineKey::new(&p, None)).is_some());
        assert!(cart.line(&LineKey::new(&p, Some(&a))).is_some());
    }

    #[test]
    fn test_remove_drops_every_variant() {
        let mut cart = mixed_cart();
        cart.remove_item(ProductId(1));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].product.id, ProductId(3));
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut cart = mixed_cart();
        let before = cart.clone();

        cart.remove_item(ProductId(42));
        assert_eq!(cart, before);

        let mut empty = Cart::new();
        empty.remove_item(ProductId(1));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_update_to_zero_matches_remove() {
        let starts = [Cart::new(), mixed_cart(), {
            let mut c = mixed_cart();
            c.remove_item(ProductId(3));
            c
        }];

        for start in starts {
            for id in [1, 2, 3, 99] {
                for qty in [0, -1, -10] {
                    let mut updated = start.clone();
                    updated.update_quantity(ProductId(id), qty);

                    let mut removed = start.clone();
                    removed.remove_item(ProductId(id));

                    assert_eq!(updated.items(), removed.items());
                }
            }
        }
    }

    #[test]
    fn test_update_sets_every_variant() {
        let mut cart = mixed_cart();
        cart.update_quantity(ProductId(1), 4);

        let quantities: Vec<i64> = cart.items().iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![4, 4, 1]);
        assert_eq!(cart.total_items(), 9);
    }

    #[test]
    fn test_update_absent_id_is_noop() {
        let mut cart = mixed_cart();
        let before = cart.clone();
        cart.update_quantity(ProductId(77), 3);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_total_items_counts_units_not_lines() {
        let cart = mixed_cart();
        assert_eq!(cart.line_count(), 3);
        assert_eq!(cart.total_items(), 4);
        assert_eq!(
            cart.total_items(),
            cart.items().iter().map(|i| i.quantity).sum::<i64>()
        );
    }

    #[test]
    fn test_totals_use_alternative_when_selected() {
        let cart = mixed_cart();

        // 1 × $10.00 + 2 × $12.00 + 1 × $5.00
        assert_eq!(cart.total_price().cents(), 3900);
        // 1 × 20 + 2 × 5 + 1 × 8
        assert_eq!(cart.total_carbon_footprint(), 38.0);
    }

    #[test]
    fn test_carbon_savings_with_alternative() {
        let p = test_product(1, 1000, 20.0);
        let a = test_product(2, 1200, 5.0);

        let mut cart = Cart::new();
        cart.add_item(&p, Some(&a));
        assert_eq!(cart.carbon_savings(), 15.0);
    }

    #[test]
    fn test_carbon_savings_zero_without_alternatives() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 1000, 20.0), None);
        cart.add_item(&test_product(2, 1000, 3.0), None);
        cart.update_quantity(ProductId(1), 6);

        assert_eq!(cart.carbon_savings(), 0.0);
    }

    #[test]
    fn test_carbon_savings_can_be_negative() {
        let p = test_product(1, 1000, 4.0);
        let dirtier = test_product(2, 900, 10.0);

        let mut cart = Cart::new();
        cart.add_item(&p, Some(&dirtier));
        cart.add_item(&p, Some(&dirtier));

        assert_eq!(cart.carbon_savings(), -12.0);
    }

    #[test]
    fn test_zero_priced_alternative_is_used() {
        let p = test_product(1, 1000, 10.0);
        let free = test_product(2, 0, 0.0);

        let mut cart = Cart::new();
        cart.add_item(&p, Some(&free));

        assert!(cart.total_price().is_zero());
        assert_eq!(cart.total_carbon_footprint(), 0.0);
    }

    #[test]
    fn test_clear_and_toggle() {
        let mut cart = mixed_cart();
        assert!(!cart.is_open());

        cart.toggle();
        assert!(cart.is_open());
        assert_eq!(cart.total_items(), 4);

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.is_open());
        assert!(cart.total_price().is_zero());

        cart.toggle();
        assert!(!cart.is_open());
    }

    #[test]
    fn test_restore_normalizes_lines() {
        let p = test_product(1, 1000, 20.0);
        let a = test_product(2, 1200, 5.0);

        let mut dup = CartItem::new(&p, Some(&a));
        dup.quantity = 2;
        let mut empty_line = CartItem::new(&a, None);
        empty_line.quantity = 0;

        let cart = Cart::restore(vec![
            CartItem::new(&p, Some(&a)),
            CartItem::new(&p, None),
            empty_line,
            dup,
        ]);

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.items()[1].key(), LineKey::new(&p, None));
        assert!(!cart.is_open());
    }

    #[test]
    fn test_items_round_trip_through_json() {
        let cart = mixed_cart();

        let json = serde_json::to_string(cart.items()).unwrap();
        let items: Vec<CartItem> = serde_json::from_str(&json).unwrap();
        let restored = Cart::restore(items);

        assert_eq!(restored.items(), cart.items());
        let keys: Vec<LineKey> = restored.items().iter().map(CartItem::key).collect();
        let original: Vec<LineKey> = cart.items().iter().map(CartItem::key).collect();
        assert_eq!(keys, original);
    }

    #[test]
    fn test_cart_totals_snapshot() {
        let totals = CartTotals::from(&mixed_cart());

        assert_eq!(totals.line_count, 3);
        assert_eq!(totals.total_items, 4);
        assert_eq!(totals.total_price.cents(), 3900);
        assert_eq!(totals.carbon_savings, 30.0);
        assert!((totals.driving_miles - 38.0 * 2.3).abs() < 1e-9);
    }

    #[test]
    fn test_huge_quantity_totals_saturate() {
        let mut cart = Cart::new();
        let product = test_product(1, 2999, 4.0);
        cart.add_item(&product, None);
        cart.update_quantity(ProductId(1), i64::MAX);

        assert_eq!(cart.items()[0].quantity, i64::MAX);
        assert_eq!(cart.total_price().cents(), i64::MAX);
        assert_eq!(cart.total_items(), i64::MAX);
        assert!(cart.total_carbon_footprint().is_finite());
    }

    #[test]
    fn test_add_after_max_quantity_stays_at_max() {
        let product = test_product(1, 100, 1.0);
        let mut cart = Cart::new();
        cart.add_item(&product, None);
        cart.update_quantity(ProductId(1), i64::MAX);
        cart.add_item(&product, None);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, i64::MAX);
    }

    #[test]
    fn test_total_items_saturates_across_lines() {
        let p = test_product(1, 100, 1.0);
        let a = test_product(2, 100, 1.0);
        let mut cart = Cart::new();
        cart.add_item(&p, None);
        cart.add_item(&p, Some(&a));
        cart.update_quantity(ProductId(1), i64::MAX);

        assert_eq!(cart.total_items(), i64::MAX);
        assert_eq!(cart.total_price().cents(), i64::MAX);
    }

    #[test]
    fn test_restore_merge_saturates() {
        let mut item = CartItem::new(&test_product(1, 100, 1.0), None);
        item.quantity = i64::MAX;

        let cart = Cart::restore(vec![item.clone(), item]);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, i64::MAX);
    }
}
