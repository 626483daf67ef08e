//! The key-value capability the journal is stored in.
//!
//! The journal never talks to a concrete backend; it is handed something that
//! implements [`KeyValueStore`]. Keys and values are plain strings, there is
//! no cross-key transaction, and every call may suspend until the backend's
//! I/O finishes.
use std::collections::BTreeMap;

use async_trait::async_trait;
use log::trace;
use tokio::sync::RwLock;

use crate::Result;

/// Asynchronous string key-value storage shared with other users of the device.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads one value; `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes one value, replacing whatever was there.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Every key currently present, in no particular order.
    async fn get_all_keys(&self) -> Result<Vec<String>>;

    /// Reads several keys at once. The result has one pair per requested key,
    /// in request order, with `None` for keys that are absent.
    async fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>>;

    /// Removes several keys at once. Absent keys are ignored.
    async fn multi_remove(&self, keys: &[String]) -> Result<()>;
}

/// Process-local storage, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        trace!("memory store: set {}", key);
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_all_keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>> {
        let entries = self.entries.read().await;
        Ok(keys
            .iter()
            .map(|key| (key.clone(), entries.get(key).cloned()))
            .collect())
    }

    async fn multi_remove(&self, keys: &[String]) -> Result<()> {
        trace!("memory store: removing {} keys", keys.len());
        let mut entries = self.entries.write().await;
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }
}
