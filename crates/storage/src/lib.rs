//! Storage abstraction and implementations for examplan.
//!
//! This crate provides a key-value storage trait with a JSON file backend,
//! an in-memory backend, and a typed manager that never lets a storage
//! failure escape to the caller.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;
pub mod backup;
pub mod manager;

pub use trait_::{KeyValueStore, StorageError, Result};
pub use json_storage::JsonFileStore;
pub use memory::MemoryStore;
pub use backup::Backup;
pub use manager::{keys, StoreManager, STORAGE_BUDGET_BYTES};
