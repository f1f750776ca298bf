//! Fake Store API adapter. Implements CatalogPort over the public demo
//! catalog at fakestoreapi.com.

use crate::domain::{DomainError, Product};
use crate::ports::CatalogPort;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Catalog entry as returned by the API. Prices arrive as JSON numbers and
/// are decoded straight into Decimal.
#[derive(Debug, Deserialize)]
struct ProductDto {
    id: u64,
    title: String,
    price: Decimal,
    image: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            price: dto.price,
            image: dto.image,
            description: dto.description,
            category: dto.category,
        }
    }
}

/// HTTP catalog adapter.
pub struct FakeStoreCatalog {
    client: Client,
    base_url: String,
}

impl FakeStoreCatalog {
    /// `base_url` without a trailing slash, e.g. "https://fakestoreapi.com".
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Decode the API response body into products.
    fn parse_products(body: &str) -> Result<Vec<Product>, DomainError> {
        let dtos: Vec<ProductDto> = serde_json::from_str(body)
            .map_err(|e| DomainError::Catalog(format!("unexpected response shape: {}", e)))?;
        Ok(dtos.into_iter().map(Product::from).collect())
    }
}

#[async_trait::async_trait]
impl CatalogPort for FakeStoreCatalog {
    async fn fetch_products(&self, limit: usize) -> Result<Vec<Product>, DomainError> {
        let url = format!("{}/products?limit={}", self.base_url, limit);
        debug!(%url, "fetching catalog");

        let res = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| DomainError::Catalog(format!("request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(DomainError::Catalog(format!(
                "catalog API error {}: {}",
                status, text
            )));
        }

        let body = res
            .text()
            .await
            .map_err(|e| DomainError::Catalog(format!("read body: {}", e)))?;
        Self::parse_products(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_products() {
        let body = r#"[
            {"id":1,"title":"Fjallraven Backpack","price":109.95,
             "description":"Your perfect pack for everyday use",
             "category":"men's clothing",
             "image":"https://fakestoreapi.com/img/1.jpg","rating":{"rate":3.9,"count":120}},
            {"id":2,"title":"Mens Casual T-Shirt","price":22.3,
             "image":"https://fakestoreapi.com/img/2.jpg"}
        ]"#;

        let products = FakeStoreCatalog::parse_products(body).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[0].price, Decimal::from_str("109.95").unwrap());
        assert_eq!(
            products[0].category.as_deref(),
            Some("men's clothing")
        );
        assert_eq!(products[1].price, Decimal::from_str("22.3").unwrap());
        assert!(products[1].description.is_none());
    }

    #[test]
    fn test_parse_products_rejects_garbage() {
        let err = FakeStoreCatalog::parse_products("{\"not\":\"a list\"}").unwrap_err();
        assert!(matches!(err, DomainError::Catalog(_)));
    }
}
