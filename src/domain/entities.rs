//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/storage types here; these are mapped from adapters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as listed by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    /// Unit price in the shop currency. Decimal, never floating point.
    pub price: Decimal,
    pub image: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// One cart line. Unique per product id; quantity is merged, never duplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u64,
    pub title: String,
    pub price: Decimal,
    pub image: String,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
        }
    }

    /// Price of this line: unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Contact and shipping details collected at checkout.
#[derive(Debug, Clone)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
}

impl Customer {
    /// Single-line shipping address for the order message.
    pub fn address_line(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.street, self.city, self.region, self.postal_code
        )
    }
}

/// Checkout totals over the current cart.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_line_total() {
        let product = Product {
            id: 7,
            title: "Backpack".to_string(),
            price: Decimal::from_str("109.95").unwrap(),
            image: "https://example.com/7.png".to_string(),
            description: None,
            category: None,
        };
        let item = CartItem::new(&product, 3);

        assert_eq!(item.line_total(), Decimal::from_str("329.85").unwrap());
    }

    #[test]
    fn test_address_line() {
        let customer = Customer {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "".to_string(),
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            region: "IL".to_string(),
            postal_code: "62704".to_string(),
        };

        assert_eq!(customer.address_line(), "1 Main St, Springfield, IL, 62704");
    }
}
