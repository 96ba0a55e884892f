//! # Cart Repository
//!
//! Persists the cart's lines as one JSON blob under a fixed key, so a cart
//! survives a process restart.
//!
//! ## Stored Format
//! ```text
//! kv_store['ecocart-storage'] =
//! {
//!   "version": 1,
//!   "items": [
//!     { "product": {...}, "quantity": 2, "selectedAlternative": {...} },
//!     { "product": {...}, "quantity": 1 }
//!   ]
//! }
//! ```
//! Items mirror `CartItem` exactly, in cart order. The open/closed flag of
//! the cart panel is not stored.
//!
//! ## Read Failures
//! ```text
//! load_or_empty()
//!      │
//!      ├── no row ─────────────────► empty cart
//!      ├── row parses ─────────────► Cart::restore(items)
//!      └── SQL error / bad JSON ───► warn! + empty cart
//! ```

use ecocart_core::{Cart, CartItem, CART_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::kv::KvRepository;

/// Current version of the stored cart blob.
pub const CART_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct StoredCart {
    version: u32,
    items: Vec<CartItem>,
}

#[derive(Debug, Serialize)]
struct StoredCartRef<'a> {
    version: u32,
    items: &'a [CartItem],
}

/// Repository for the persisted cart.
#[derive(Debug, Clone)]
pub struct CartRepository {
    kv: KvRepository,
    key: String,
}

impl CartRepository {
    /// Binds to the default key, [`CART_STORAGE_KEY`].
    pub fn new(kv: KvRepository) -> Self {
        CartRepository::with_key(kv, CART_STORAGE_KEY)
    }

    pub fn with_key(kv: KvRepository, key: impl Into<String>) -> Self {
        CartRepository {
            kv,
            key: key.into(),
        }
    }

    /// The storage key this repository reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the stored lines.
    ///
    /// ## Returns
    /// * `Ok(None)` - Nothing saved yet
    /// * `Ok(Some(items))` - Lines as saved, not yet normalized
    /// * `Err(_)` - Storage failure or undecodable blob
    pub async fn load(&self) -> DbResult<Option<Vec<CartItem>>> {
        let Some(blob) = self.kv.get(&self.key).await? else {
            return Ok(None);
        };

        let stored: StoredCart = serde_json::from_str(&blob)?;
        if stored.version != CART_FORMAT_VERSION {
            return Err(DbError::UnsupportedFormat {
                key: self.key.clone(),
                version: stored.version,
            });
        }

        debug!(key = %self.key, lines = stored.items.len(), "Loaded stored cart");
        Ok(Some(stored.items))
    }

    /// Rehydrates the cart, falling back to an empty one on any failure.
    pub async fn load_or_empty(&self) -> Cart {
        match self.load().await {
            Ok(Some(items)) => {
                let stored_lines = items.len();
                let cart = Cart::restore(items);
                if cart.line_count() != stored_lines {
                    info!(
                        key = %self.key,
                        stored = stored_lines,
                        kept = cart.line_count(),
                        "Normalized stored cart lines"
                    );
                }
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored cart unreadable, starting empty");
                Cart::new()
            }
        }
    }

    /// Writes the cart's current lines, replacing what was stored.
    pub async fn save(&self, cart: &Cart) -> DbResult<()> {
        let blob = serde_json::to_string(&StoredCartRef {
            version: CART_FORMAT_VERSION,
            items: cart.items(),
        })?;

        self.kv.put(&self.key, &blob).await?;

        debug!(key = %self.key, lines = cart.line_count(), "Saved cart");
        Ok(())
    }

    /// Deletes the stored cart.
    pub async fn clear(&self) -> DbResult<()> {
        self.kv.delete(&self.key).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use ecocart_core::{LineKey, Money, Product, ProductId};

    fn test_product(id: u32, price_cents: i64, footprint: f64) -> Product {
        Product {
            id: ProductId(id),
            name: format!("Product {}", id),
            category: "Home".to_string(),
            image: Some(format!("/img/{}.jpg", id)),
            price: Money::from_cents(price_cents),
            carbon_footprint: footprint,
            description: "Test product".to_string(),
            alternatives: vec![ProductId(id + 1)],
        }
    }

    fn sample_cart() -> Cart {
        let p1 = test_product(1, 2999, 20.0);
        let p2 = test_product(2, 3450, 5.5);
        let mut cart = Cart::new();
        cart.add_item(&p1, None);
        cart.add_item(&p1, Some(&p2));
        cart.add_item(&p1, Some(&p2));
        cart.toggle();
        cart
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.carts();
        let cart = sample_cart();

        repo.save(&cart).await.unwrap();
        let restored = repo.load_or_empty().await;

        assert_eq!(restored.items(), cart.items());
        let keys: Vec<LineKey> = restored.items().iter().map(CartItem::key).collect();
        assert_eq!(
            keys[1],
            LineKey {
                product_id: ProductId(1),
                alternative_id: Some(ProductId(2)),
            }
        );
        // The panel flag is not persisted.
        assert!(!restored.is_open());
    }

    #[tokio::test]
    async fn test_missing_cart_is_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.carts();

        assert!(repo.load().await.unwrap().is_none());
        assert!(repo.load_or_empty().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_blob_falls_back_to_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv().put(CART_STORAGE_KEY, "{\"items\": [oops").await.unwrap();

        let repo = db.carts();
        assert!(matches!(repo.load().await, Err(DbError::Serialization(_))));
        assert!(repo.load_or_empty().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_version_falls_back_to_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv()
            .put(CART_STORAGE_KEY, r#"{"version": 99, "items": []}"#)
            .await
            .unwrap();

        let repo = db.carts();
        assert!(matches!(
            repo.load().await,
            Err(DbError::UnsupportedFormat { version: 99, .. })
        ));
        assert!(repo.load_or_empty().await.is_empty());
    }

    #[tokio::test]
    async fn test_stored_lines_are_normalized() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let blob = r#"{"version": 1, "items": [
            {"product": {"id": 1, "name": "A", "category": "X", "price": 10, "carbonFootprint": 8, "description": ""}, "quantity": 2},
            {"product": {"id": 1, "name": "A", "category": "X", "price": 10, "carbonFootprint": 8, "description": ""}, "quantity": 1},
            {"product": {"id": 2, "name": "B", "category": "X", "price": 5, "carbonFootprint": 1, "description": ""}, "quantity": 0}
        ]}"#;
        db.kv().put(CART_STORAGE_KEY, blob).await.unwrap();

        let cart = db.carts().load_or_empty().await;
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price().cents(), 3000);
    }

    #[tokio::test]
    async fn test_huge_stored_quantities_restore_without_overflow() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let line = r#"{"product": {"id": 1, "name": "A", "category": "X", "price": 10, "carbonFootprint": 8, "description": ""}, "quantity": 9223372036854775807}"#;
        let blob = format!(r#"{{"version": 1, "items": [{line}, {line}]}}"#);
        db.kv().put(CART_STORAGE_KEY, &blob).await.unwrap();

        let cart = db.carts().load_or_empty().await;
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, i64::MAX);
        assert_eq!(cart.total_items(), i64::MAX);
        assert_eq!(cart.total_price().cents(), i64::MAX);
    }

    #[tokio::test]
    async fn test_sub_cent_stored_price_falls_back_to_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let blob = r#"{"version": 1, "items": [
            {"product": {"id": 1, "name": "A", "category": "X", "price": 0.125, "carbonFootprint": 1, "description": ""}, "quantity": 2}
        ]}"#;
        db.kv().put(CART_STORAGE_KEY, blob).await.unwrap();

        let repo = db.carts();
        assert!(matches!(repo.load().await, Err(DbError::Serialization(_))));
        assert!(repo.load_or_empty().await.is_empty());
    }

    #[tokio::test]
    async fn test_keys_are_isolated_and_clearable() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let main = db.carts();
        let other = db.carts_with_key("ecocart-storage-test");

        main.save(&sample_cart()).await.unwrap();
        assert!(other.load().await.unwrap().is_none());

        main.clear().await.unwrap();
        assert!(main.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cart_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ecocart.db");
        let cart = sample_cart();

        {
            let db = Database::new(DbConfig::new(&path)).await.unwrap();
            db.carts().save(&cart).await.unwrap();
            db.close().await;
        }

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let restored = db.carts().load_or_empty().await;
        assert_eq!(restored.items(), cart.items());
        assert_eq!(restored.total_price().cents(), 2999 + 2 * 3450);
    }
}
