//! Cart ledger: the authoritative record of what this session intends to buy.
//!
//! - At most one line per product id; adding an existing product merges quantity
//! - Every mutation writes the full serialized cart through to the storage slot
//! - `clear` deletes the slot entirely; `load` rehydrates from it on startup

use crate::domain::{CartItem, DomainError, Product};
use crate::ports::StoragePort;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Storage slot for the serialized cart. Owned exclusively by CartService;
/// no other component writes this key.
const CART_KEY: &str = "cart";

/// Cart service. Holds the in-memory line items and the storage port
/// they are persisted through.
pub struct CartService {
    storage: Arc<dyn StoragePort>,
    items: RwLock<Vec<CartItem>>,
}

impl CartService {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self {
            storage,
            items: RwLock::new(Vec::new()),
        }
    }

    /// Add `quantity` of `product`. If a line for the same product id exists,
    /// its quantity grows by `quantity` (saturating); otherwise a new line is
    /// appended, preserving insertion order. Rejects a zero quantity.
    pub async fn add(&self, product: &Product, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity(quantity));
        }
        {
            let mut items = self.items.write().await;
            match items.iter_mut().find(|item| item.id == product.id) {
                Some(line) => line.quantity = line.quantity.saturating_add(quantity),
                None => items.push(CartItem::new(product, quantity)),
            }
        }
        debug!(product_id = product.id, quantity, "added to cart");
        self.persist().await
    }

    /// Remove the line matching `product_id`. Absence is a no-op, not an error.
    pub async fn remove(&self, product_id: u64) -> Result<(), DomainError> {
        self.items.write().await.retain(|item| item.id != product_id);
        self.persist().await
    }

    /// Set the matching line's quantity. Unknown id is a no-op. Rejects a
    /// zero quantity.
    pub async fn update_quantity(&self, product_id: u64, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity(quantity));
        }
        {
            let mut items = self.items.write().await;
            if let Some(line) = items.iter_mut().find(|item| item.id == product_id) {
                line.quantity = quantity;
            }
        }
        self.persist().await
    }

    /// Sum of price times quantity over all lines. Pure read.
    pub async fn total_price(&self) -> Decimal {
        self.items
            .read()
            .await
            .iter()
            .fold(Decimal::ZERO, |total, item| total + item.line_total())
    }

    /// Number of distinct products in the cart (the cart badge), not a
    /// quantity sum. Equals the line count given the uniqueness invariant.
    pub async fn unique_item_count(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Snapshot of the current lines, in insertion order.
    pub async fn items(&self) -> Vec<CartItem> {
        self.items.read().await.clone()
    }

    /// Empty the cart and delete the persisted slot entirely (not a write
    /// of an empty list).
    pub async fn clear(&self) -> Result<(), DomainError> {
        self.items.write().await.clear();
        self.storage.remove(CART_KEY).await
    }

    /// Rehydrate from the storage slot. An absent slot leaves in-memory state
    /// unchanged; a malformed slot is logged and likewise left alone rather
    /// than wiping the cart. Idempotent, safe to call once per startup.
    pub async fn load(&self) -> Result<(), DomainError> {
        let raw = match self.storage.get(CART_KEY).await? {
            Some(raw) => raw,
            None => return Ok(()),
        };
        match serde_json::from_str::<Vec<CartItem>>(&raw) {
            Ok(items) => {
                debug!(count = items.len(), "cart rehydrated from storage");
                *self.items.write().await = items;
            }
            Err(e) => warn!(error = %e, "stored cart is malformed, keeping current state"),
        }
        Ok(())
    }

    /// Write-through: serialize the full cart into the slot.
    async fn persist(&self) -> Result<(), DomainError> {
        let json = {
            let items = self.items.read().await;
            serde_json::to_string(&*items).map_err(|e| DomainError::Storage(e.to_string()))?
        };
        self.storage.set(CART_KEY, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::memory_store::MemoryStore;
    use std::str::FromStr;

    fn product(id: u64, price: &str) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            price: Decimal::from_str(price).unwrap(),
            image: format!("https://example.com/{}.png", id),
            description: None,
            category: None,
        }
    }

    fn cart_with_store() -> (Arc<dyn StoragePort>, CartService) {
        let store: Arc<dyn StoragePort> = Arc::new(MemoryStore::new());
        let cart = CartService::new(Arc::clone(&store));
        (store, cart)
    }

    #[tokio::test]
    async fn test_add_merges_same_product() {
        let (_, cart) = cart_with_store();

        cart.add(&product(1, "10"), 2).await.unwrap();
        cart.add(&product(1, "10"), 3).await.unwrap();

        let items = cart.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
    }

    #[tokio::test]
    async fn test_distinct_products_keep_insertion_order() {
        let (_, cart) = cart_with_store();

        cart.add(&product(3, "1"), 1).await.unwrap();
        cart.add(&product(1, "1"), 1).await.unwrap();
        cart.add(&product(2, "1"), 1).await.unwrap();

        assert_eq!(cart.unique_item_count().await, 3);
        let ids: Vec<u64> = cart.items().await.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_total_price_follows_mutations() {
        let (_, cart) = cart_with_store();

        cart.add(&product(1, "10"), 1).await.unwrap();
        cart.add(&product(2, "5"), 3).await.unwrap();
        assert_eq!(cart.total_price().await, Decimal::from(25));
        assert_eq!(cart.unique_item_count().await, 2);

        cart.update_quantity(1, 5).await.unwrap();
        assert_eq!(cart.total_price().await, Decimal::from(55));

        cart.remove(2).await.unwrap();
        assert_eq!(cart.total_price().await, Decimal::from(50));
    }

    #[tokio::test]
    async fn test_total_price_decimal_prices() {
        let (_, cart) = cart_with_store();

        cart.add(&product(1, "109.95"), 2).await.unwrap();
        cart.add(&product(2, "0.10"), 3).await.unwrap();

        assert_eq!(
            cart.total_price().await,
            Decimal::from_str("220.20").unwrap()
        );
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let (_, cart) = cart_with_store();

        cart.add(&product(1, "10"), 1).await.unwrap();
        cart.remove(1).await.unwrap();
        cart.remove(1).await.unwrap();

        assert_eq!(cart.unique_item_count().await, 0);
    }

    #[tokio::test]
    async fn test_update_quantity_unknown_id_is_noop() {
        let (_, cart) = cart_with_store();

        cart.add(&product(1, "10"), 2).await.unwrap();
        cart.update_quantity(42, 7).await.unwrap();

        let items = cart.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_zero_quantity_rejected() {
        let (store, cart) = cart_with_store();

        let err = cart.add(&product(1, "10"), 0).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuantity(0)));
        // Rejected mutation must not touch the slot either
        assert!(store.get("cart").await.unwrap().is_none());

        cart.add(&product(1, "10"), 2).await.unwrap();
        let err = cart.update_quantity(1, 0).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuantity(0)));
        assert_eq!(cart.items().await[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_add_saturates_instead_of_overflowing() {
        let (_, cart) = cart_with_store();

        cart.add(&product(1, "10"), u32::MAX).await.unwrap();
        cart.add(&product(1, "10"), 5).await.unwrap();

        assert_eq!(cart.items().await[0].quantity, u32::MAX);
    }

    #[tokio::test]
    async fn test_write_through_after_each_mutation() {
        let (store, cart) = cart_with_store();

        cart.add(&product(1, "10"), 2).await.unwrap();
        let raw = store.get("cart").await.unwrap().unwrap();
        let stored: Vec<CartItem> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].quantity, 2);

        cart.update_quantity(1, 4).await.unwrap();
        let raw = store.get("cart").await.unwrap().unwrap();
        let stored: Vec<CartItem> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored[0].quantity, 4);

        // Removing the last line persists an empty list; only clear deletes the slot
        cart.remove(1).await.unwrap();
        assert_eq!(store.get("cart").await.unwrap().unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_clear_deletes_slot_and_load_stays_empty() {
        let (store, cart) = cart_with_store();

        cart.add(&product(1, "10"), 1).await.unwrap();
        cart.clear().await.unwrap();

        assert!(store.get("cart").await.unwrap().is_none());
        cart.load().await.unwrap();
        assert_eq!(cart.unique_item_count().await, 0);
    }

    #[tokio::test]
    async fn test_round_trip_into_fresh_session() {
        let (store, cart) = cart_with_store();
        cart.add(&product(1, "19.99"), 2).await.unwrap();

        // Fresh session over the same slot
        let rehydrated = CartService::new(Arc::clone(&store));
        rehydrated.load().await.unwrap();

        let items = rehydrated.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].price, Decimal::from_str("19.99").unwrap());
    }

    #[tokio::test]
    async fn test_load_absent_slot_keeps_state() {
        let (store, cart) = cart_with_store();
        cart.add(&product(1, "10"), 1).await.unwrap();

        // Slot vanishes behind our back; in-memory state must survive
        store.remove("cart").await.unwrap();
        cart.load().await.unwrap();

        assert_eq!(cart.unique_item_count().await, 1);
    }

    #[tokio::test]
    async fn test_load_malformed_slot_keeps_state() {
        let (store, cart) = cart_with_store();
        cart.add(&product(1, "10"), 1).await.unwrap();

        store.set("cart", "not json at all").await.unwrap();
        cart.load().await.unwrap();

        let items = cart.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
    }

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let (store, cart) = cart_with_store();
        cart.add(&product(1, "10"), 2).await.unwrap();

        let rehydrated = CartService::new(Arc::clone(&store));
        rehydrated.load().await.unwrap();
        rehydrated.load().await.unwrap();

        assert_eq!(rehydrated.unique_item_count().await, 1);
        assert_eq!(rehydrated.items().await[0].quantity, 2);
    }
}
