//! JSON file storage implementation.
//!
//! Stores each logical key as `<key>.json` inside a data directory. Size is
//! accounted as key length plus value length, the same way the browser
//! store budget is counted.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::trait_::{check_key, check_quota};
use super::{KeyValueStore, Result};

/// File-based JSON storage backend.
pub struct JsonFileStore {
    root: PathBuf,
    quota_bytes: Option<u64>,
}

impl JsonFileStore {
    /// Create storage rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;

        Ok(Self {
            root,
            quota_bytes: None,
        })
    }

    /// Limit the total stored size. Writes beyond it fail with
    /// [`StorageError::QuotaExceeded`](crate::StorageError::QuotaExceeded).
    pub fn with_quota(mut self, quota_bytes: u64) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    /// Data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Bytes used by every key except `skip`.
    async fn used_bytes_except(&self, skip: &str) -> Result<u64> {
        let mut total = 0u64;
        for key in self.keys().await? {
            if key == skip {
                continue;
            }
            if let Some(value) = self.get(&key).await? {
                total += (key.len() + value.len()) as u64;
            }
        }
        Ok(total)
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        match fs::read_to_string(self.key_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        if self.quota_bytes.is_some() {
            let needed = self.used_bytes_except(key).await? + (key.len() + value.len()) as u64;
            check_quota(needed, self.quota_bytes)?;
        }

        fs::write(self.key_path(key), value.as_bytes()).await?;
        tracing::debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        check_key(key)?;
        fs::remove_file(self.key_path(key)).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
        })?;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut rd = fs::read_dir(&self.root).await?;
        while let Some(entry) = rd.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}
