//! In-memory store for tests and dry runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::trait_::{check_key, check_quota};
use super::{KeyValueStore, Result};

/// Volatile key-value store. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
    quota_bytes: Option<u64>,
}

impl MemoryStore {
    /// Empty store without a size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total stored size, counted as key plus value length.
    pub fn with_quota(mut self, quota_bytes: u64) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        let mut entries = self.entries.lock().await;

        let others: usize = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        check_quota((others + key.len() + value.len()) as u64, self.quota_bytes)?;

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        check_key(key)?;
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.lock().await.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_entries() {
        let mut store = MemoryStore::new();
        let view = store.clone();

        store.set("maturaProgress", "{}").await.unwrap();
        assert_eq!(view.get("maturaProgress").await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_quota() {
        let mut store = MemoryStore::new().with_quota(8);
        store.set("k", "1234567").await.unwrap();
        assert!(store.set("k2", "1").await.is_err());
        assert_eq!(store.keys().await.unwrap(), vec!["k".to_string()]);
    }
}
