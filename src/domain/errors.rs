//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Notification error: {0}")]
    Notify(String),

    #[error("Checkout error: {0}")]
    Checkout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),

    /// Cart mutations require a quantity of at least 1.
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),
}
