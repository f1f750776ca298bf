//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, Product};

/// Durable string-keyed slot store, surviving restarts. The localStorage
/// contract: one serialized value per key, `remove` deletes the slot
/// entirely rather than writing an empty value.
#[async_trait::async_trait]
pub trait StoragePort: Send + Sync {
    /// Read the value stored under `key`. Returns `None` if the slot is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Delete the slot for `key`. Absence is a no-op.
    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}

/// Read-only product catalog.
#[async_trait::async_trait]
pub trait CatalogPort: Send + Sync {
    /// Fetch up to `limit` products from the catalog.
    async fn fetch_products(&self, limit: usize) -> Result<Vec<Product>, DomainError>;
}

/// Order notification sink. One formatted message per placed order.
#[async_trait::async_trait]
pub trait NotifierPort: Send + Sync {
    /// Deliver the order message. Any non-success response is an error;
    /// the caller decides what to do with the cart.
    async fn send_order(&self, text: &str) -> Result<(), DomainError>;
}
