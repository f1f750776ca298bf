//! Implements StoragePort using a single JSON file of string slots.
//!
//! The localStorage analog: one durable key-value map surviving restarts.

use crate::domain::DomainError;
use crate::ports::StoragePort;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Slots: key -> serialized value
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    slots: HashMap<String, String>,
}

/// JSON file-based slot storage.
pub struct LocalStore {
    path: std::path::PathBuf,
    cache: tokio::sync::RwLock<StoreData>,
}

impl LocalStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: tokio::sync::RwLock::new(StoreData::default()),
        }
    }

    /// Load slots from disk. Call after construction. A missing file starts
    /// empty; an unreadable one is logged and starts empty as well.
    pub async fn load(&self) -> Result<(), DomainError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(data) => data,
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "store file is malformed, starting empty");
                    StoreData::default()
                }
            },
            Err(_) => StoreData::default(),
        };
        *self.cache.write().await = data;
        Ok(())
    }

    /// Atomic save using the write-replace pattern:
    /// 1. Write to temp file
    /// 2. sync_all() to ensure flush to disk
    /// 3. Atomic rename to target path
    async fn save(&self) -> Result<(), DomainError> {
        let data = self.cache.read().await;
        let json = serde_json::to_string_pretty(&*data)
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        drop(data);

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Storage(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Storage(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Storage(format!("sync temp file: {}", e)))?;
        drop(f); // Close file handle before rename

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Storage(format!("atomic rename failed: {}", e)))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl StoragePort for LocalStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let cache = self.cache.read().await;
        Ok(cache.slots.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        {
            let mut cache = self.cache.write().await;
            cache.slots.insert(key.to_string(), value.to_string());
        }
        self.save().await
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        {
            let mut cache = self.cache.write().await;
            cache.slots.remove(key);
        }
        self.save().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("tg-shop-{}-{}.json", name, std::process::id()))
    }

    async fn cleanup(path: &Path) {
        let _ = fs::remove_file(path).await;
        let _ = fs::remove_file(path.with_extension("json.tmp")).await;
    }

    #[tokio::test]
    async fn test_set_get_survives_reopen() {
        let path = temp_store_path("reopen");
        cleanup(&path).await;

        let store = LocalStore::new(&path);
        store.load().await.unwrap();
        store.set("cart", "[1,2,3]").await.unwrap();

        let reopened = LocalStore::new(&path);
        reopened.load().await.unwrap();
        assert_eq!(reopened.get("cart").await.unwrap().unwrap(), "[1,2,3]");

        cleanup(&path).await;
    }

    #[tokio::test]
    async fn test_remove_deletes_slot() {
        let path = temp_store_path("remove");
        cleanup(&path).await;

        let store = LocalStore::new(&path);
        store.load().await.unwrap();
        store.set("cart", "value").await.unwrap();
        store.remove("cart").await.unwrap();

        assert!(store.get("cart").await.unwrap().is_none());

        // And not just in memory
        let reopened = LocalStore::new(&path);
        reopened.load().await.unwrap();
        assert!(reopened.get("cart").await.unwrap().is_none());

        cleanup(&path).await;
    }

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let path = temp_store_path("missing");
        cleanup(&path).await;

        let store = LocalStore::new(&path);
        store.load().await.unwrap();

        assert!(store.get("cart").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_file_starts_empty() {
        let path = temp_store_path("malformed");
        cleanup(&path).await;
        fs::write(&path, "{{{ not json").await.unwrap();

        let store = LocalStore::new(&path);
        store.load().await.unwrap();
        assert!(store.get("cart").await.unwrap().is_none());

        cleanup(&path).await;
    }

    #[tokio::test]
    async fn test_saved_file_is_valid_json() {
        let path = temp_store_path("valid-json");
        cleanup(&path).await;

        let store = LocalStore::new(&path);
        store.load().await.unwrap();
        store.set("cart", "[]").await.unwrap();

        let raw = fs::read_to_string(&path).await.unwrap();
        let parsed: StoreData = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.slots.get("cart").map(String::as_str), Some("[]"));

        cleanup(&path).await;
    }
}
