//! Product listing: fetch once through the catalog port, keep the list
//! for the rest of the session.

use crate::domain::{DomainError, Product};
use crate::ports::CatalogPort;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Catalog service. Fetch-once cache over the catalog port.
pub struct CatalogService {
    catalog: Arc<dyn CatalogPort>,
    limit: usize,
    cache: RwLock<Option<Vec<Product>>>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogPort>, limit: usize) -> Self {
        Self {
            catalog,
            limit,
            cache: RwLock::new(None),
        }
    }

    /// The product list. Fetched on first call, cached afterwards.
    pub async fn products(&self) -> Result<Vec<Product>, DomainError> {
        if let Some(products) = self.cache.read().await.as_ref() {
            return Ok(products.clone());
        }
        self.refresh().await
    }

    /// Force a re-fetch, replacing the cache.
    pub async fn refresh(&self) -> Result<Vec<Product>, DomainError> {
        let products = self.catalog.fetch_products(self.limit).await?;
        info!(count = products.len(), "catalog loaded");
        *self.cache.write().await = Some(products.clone());
        Ok(products)
    }
}
