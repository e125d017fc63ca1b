//! Key-value store abstraction.

use async_trait::async_trait;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing would exceed the configured storage budget
    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        /// Total bytes after the write
        needed: u64,
        /// Configured budget
        quota: u64,
    },

    /// Key contains characters that cannot be stored
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// A flat store of JSON strings under a small set of logical keys.
///
/// Values are opaque here; the typed layer above serializes them.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&mut self, key: &str) -> Result<()>;

    /// All stored keys.
    async fn keys(&self) -> Result<Vec<String>>;
}

/// Keys may only contain ASCII letters, digits, `-` and `_`.
pub(crate) fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Fail with [`StorageError::QuotaExceeded`] when `needed` is over `quota`.
pub(crate) fn check_quota(needed: u64, quota: Option<u64>) -> Result<()> {
    match quota {
        Some(quota) if needed > quota => Err(StorageError::QuotaExceeded { needed, quota }),
        _ => Ok(()),
    }
}
