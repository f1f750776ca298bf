//! In-memory StoragePort for tests and disk-free demo runs.
//!
//! Same contract as LocalStore, nothing survives the process.

use crate::domain::DomainError;
use crate::ports::StoragePort;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Volatile slot storage.
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StoragePort for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.slots.write().await.remove(key);
        Ok(())
    }
}
