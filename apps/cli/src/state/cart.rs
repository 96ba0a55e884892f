//! # Cart State
//!
//! The shopper's cart for the lifetime of the process.
//!
//! ## Thread Safety
//! The cart sits behind a `tokio::sync::Mutex`. Every mutation runs under the
//! lock and the new lines are saved before the lock is released, so two
//! concurrent mutations can never persist out of order.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Command               CartState              Effect                    │
//! │  ───────               ─────────              ──────                    │
//! │                                                                         │
//! │  add_to_cart ────────► mutate(add_item) ────► lock → change → notify    │
//! │  update_cart_item ───► mutate(update) ──────►        → save → unlock    │
//! │  remove_from_cart ───► mutate(remove) ──────►                           │
//! │  clear_cart ─────────► mutate(clear) ───────►                           │
//! │                                                                         │
//! │  toggle_cart ────────► toggle() ────────────► lock → flip (not saved)   │
//! │                                                                         │
//! │  get_cart ───────────► with_cart() ─────────► lock → read → unlock      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failed Saves
//! The in-memory change stays in place and the storage error is returned.
//! The next successful save writes the full cart again, so nothing is lost
//! unless the process exits first.
//!
//! ## Observers
//! [`CartState::subscribe`] and [`CartState::toggle`] are for front ends
//! embedding this library; the one-shot `ecocart` binary uses neither.

use ecocart_core::{Cart, CartTotals};
use ecocart_db::{CartRepository, DbResult};
use tokio::sync::{watch, Mutex};
use tracing::debug;

/// Process-wide cart state.
#[derive(Debug)]
pub struct CartState {
    cart: Mutex<Cart>,
    repo: CartRepository,
    totals: watch::Sender<CartTotals>,
}

impl CartState {
    /// Restores the saved cart, or starts empty.
    pub async fn load(repo: CartRepository) -> Self {
        let cart = repo.load_or_empty().await;
        debug!(key = repo.key(), lines = cart.line_count(), "Cart restored");
        CartState::with_cart_and_repo(cart, repo)
    }

    fn with_cart_and_repo(cart: Cart, repo: CartRepository) -> Self {
        let (totals, _) = watch::channel(CartTotals::from(&cart));
        CartState {
            cart: Mutex::new(cart),
            repo,
            totals,
        }
    }

    /// Runs `f` with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|c| CartTotals::from(c)).await;
    /// ```
    pub async fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().await;
        f(&cart)
    }

    /// Runs `f` with write access, notifies observers, then persists.
    ///
    /// ## Returns
    /// * `Ok(r)` - The closure's result; the cart is saved
    /// * `Err(_)` - The save failed; the in-memory change is kept
    pub async fn mutate<F, R>(&self, f: F) -> DbResult<R>
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().await;
        let result = f(&mut cart);

        self.totals.send_replace(CartTotals::from(&*cart));
        self.repo.save(&cart).await?;

        Ok(result)
    }

    /// Flips the panel flag. The flag is view state, so nothing is saved.
    pub async fn toggle(&self) -> bool {
        let mut cart = self.cart.lock().await;
        cart.toggle();
        cart.is_open()
    }

    /// Totals snapshots, refreshed after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<CartTotals> {
        self.totals.subscribe()
    }
}
