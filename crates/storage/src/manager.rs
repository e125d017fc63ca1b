//! Typed access to the application's records.
//!
//! [`StoreManager`] is the boundary between the planner and whatever
//! persists its data. Nothing fails past it: reads fall back to defaults,
//! writes report `false`, and every failure is logged. A value that cannot
//! be parsed is treated as corrupt, removed, and replaced by the default.

use examplan_core::{ExamLevel, ProgressStore, Time, UserConfig, WeekId, WeekProgress};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backup::Backup;
use crate::KeyValueStore;

/// Logical keys of the application records.
pub mod keys {
    /// User configuration
    pub const USER_CONFIG: &str = "maturaUserConfig";
    /// Progress of all weeks
    pub const PROGRESS_DATA: &str = "maturaProgress";
    /// Selected exam level
    pub const SELECTED_LEVEL: &str = "selectedLevel";
    /// Colour theme (only ever cleared)
    pub const THEME_PREFERENCE: &str = "themePreference";

    /// Every key owned by the application.
    pub const ALL: [&str; 4] = [USER_CONFIG, PROGRESS_DATA, SELECTED_LEVEL, THEME_PREFERENCE];
}

/// Assumed storage budget when reporting usage (5 MiB).
pub const STORAGE_BUDGET_BYTES: u64 = 5 * 1024 * 1024;

const PROBE_KEY: &str = "__storage_test__";

/// Typed, failure-absorbing access to a [`KeyValueStore`].
pub struct StoreManager<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StoreManager<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether the store accepts writes.
    pub async fn is_available(&mut self) -> bool {
        let probe = match self.store.set(PROBE_KEY, PROBE_KEY).await {
            Ok(()) => self.store.remove(PROBE_KEY).await,
            Err(e) => Err(e),
        };
        match probe {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "storage is not available");
                false
            }
        }
    }

    /// Approximate share of [`STORAGE_BUDGET_BYTES`] in use, in percent.
    ///
    /// 100 when the store cannot be listed, 0 when a value cannot be read.
    pub async fn usage_percentage(&self) -> u8 {
        let keys = match self.store.keys().await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "cannot list storage keys");
                return 100;
            }
        };

        let mut total = 0u64;
        for key in keys {
            match self.store.get(&key).await {
                Ok(Some(value)) => total += (key.len() + value.len()) as u64,
                Ok(None) => {}
                Err(e) => {
                    warn!(key, error = %e, "error calculating storage usage");
                    return 0;
                }
            }
        }

        let percent = (total as f64 / STORAGE_BUDGET_BYTES as f64 * 100.0).round();
        percent.min(100.0) as u8
    }

    /// Read and parse a value; `None` when missing, unreadable or corrupt.
    pub async fn get_item<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "error reading from storage");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "discarding corrupt record");
                self.remove_item(key).await;
                None
            }
        }
    }

    /// Serialize and store a value. Returns `true` on success.
    pub async fn set_item<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        let serialized = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(e) => {
                warn!(key, error = %e, "cannot serialize value");
                return false;
            }
        };

        match self.store.set(key, &serialized).await {
            Ok(()) => {
                debug!(key, "saved to storage");
                true
            }
            Err(crate::StorageError::QuotaExceeded { needed, quota }) => {
                warn!(key, needed, quota, "storage quota exceeded, consider clearing old data");
                false
            }
            Err(e) => {
                warn!(key, error = %e, "error saving to storage");
                false
            }
        }
    }

    /// Remove a value. Returns `true` on success.
    pub async fn remove_item(&mut self, key: &str) -> bool {
        match self.store.remove(key).await {
            Ok(()) => {
                debug!(key, "removed from storage");
                true
            }
            Err(e) => {
                warn!(key, error = %e, "error removing from storage");
                false
            }
        }
    }

    /// Remove every application key, leaving foreign keys alone.
    pub async fn clear_all(&mut self) -> bool {
        let mut ok = true;
        for key in keys::ALL {
            ok &= self.remove_item(key).await;
        }
        if ok {
            info!("cleared all application data");
        }
        ok
    }

    /// Stored user configuration.
    pub async fn get_user_config(&mut self) -> Option<UserConfig> {
        self.get_item(keys::USER_CONFIG).await
    }

    /// Replace the user configuration.
    pub async fn save_user_config(&mut self, config: &UserConfig) -> bool {
        self.set_item(keys::USER_CONFIG, config).await
    }

    /// Progress of all weeks; empty when missing or corrupt.
    pub async fn get_progress(&mut self) -> ProgressStore {
        self.get_item(keys::PROGRESS_DATA).await.unwrap_or_default()
    }

    /// Replace the progress of all weeks.
    pub async fn save_progress(&mut self, progress: &ProgressStore) -> bool {
        self.set_item(keys::PROGRESS_DATA, progress).await
    }

    /// Progress of one week, with defaults for an untouched week.
    pub async fn get_week_progress(&mut self, week: WeekId) -> WeekProgress {
        self.get_progress().await.week_or_default(week)
    }

    /// Replace the progress of one week, keeping the others.
    pub async fn save_week_progress(&mut self, week: WeekId, progress: WeekProgress) -> bool {
        let mut all = self.get_progress().await;
        all.insert(week, progress);
        self.save_progress(&all).await
    }

    /// Selected exam level; basic when unset.
    pub async fn get_selected_level(&mut self) -> ExamLevel {
        self.get_item(keys::SELECTED_LEVEL).await.unwrap_or_default()
    }

    /// Store the selected exam level.
    pub async fn save_selected_level(&mut self, level: ExamLevel) -> bool {
        self.set_item(keys::SELECTED_LEVEL, &level).await
    }

    /// Snapshot of every record as a [`Backup`].
    pub async fn backup(&mut self, now: Time) -> Backup {
        Backup {
            user_config: self.get_user_config().await,
            progress_data: Some(self.get_progress().await),
            selected_level: Some(self.get_selected_level().await),
            export_date: Some(now),
        }
    }

    /// Every record as pretty-printed backup JSON.
    pub async fn export_data(&mut self, now: Time) -> Option<String> {
        let backup = self.backup(now).await;
        match serde_json::to_string_pretty(&backup) {
            Ok(json) => Some(json),
            Err(e) => {
                warn!(error = %e, "cannot serialize backup");
                None
            }
        }
    }

    /// Restore records from backup JSON.
    ///
    /// Each section present in the document is written. Returns `false` if
    /// the document does not parse or any write fails.
    pub async fn import_data(&mut self, json: &str) -> bool {
        let backup: Backup = match serde_json::from_str(json) {
            Ok(backup) => backup,
            Err(e) => {
                warn!(error = %e, "error importing data");
                return false;
            }
        };

        let mut ok = true;
        if let Some(config) = &backup.user_config {
            ok &= self.save_user_config(config).await;
        }
        if let Some(progress) = &backup.progress_data {
            ok &= self.save_progress(progress).await;
        }
        if let Some(level) = backup.selected_level {
            ok &= self.save_selected_level(level).await;
        }

        if ok {
            info!("data imported successfully");
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn config() -> UserConfig {
        UserConfig {
            name: "Ola".to_string(),
            exam_year: 2026,
            exam_date: NaiveDate::from_ymd_opt(2026, 5, 12).unwrap(),
            level: ExamLevel::Extended,
            config_complete: true,
            created_at: Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap(),
        }
    }

    fn week(n: u32) -> WeekId {
        WeekId::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_defaults_when_empty() {
        let mut manager = StoreManager::new(MemoryStore::new());

        assert!(manager.is_available().await);
        // the availability probe leaves nothing behind
        assert!(manager.store().keys().await.unwrap().is_empty());
        assert_eq!(manager.get_user_config().await, None);
        assert!(manager.get_progress().await.is_empty());
        assert_eq!(manager.get_week_progress(week(4)).await, WeekProgress::default());
        assert_eq!(manager.get_selected_level().await, ExamLevel::Basic);
        assert_eq!(manager.usage_percentage().await, 0);
    }

    #[tokio::test]
    async fn test_week_progress_roundtrip() {
        let mut manager = StoreManager::new(MemoryStore::new());

        let mut progress = WeekProgress::default();
        progress.mark_theory_read();
        assert!(manager.save_week_progress(week(2), progress.clone()).await);

        let mut other = WeekProgress::default();
        other.set_quiz_score(90.0, []);
        assert!(manager.save_week_progress(week(5), other).await);

        assert_eq!(manager.get_week_progress(week(2)).await, progress);
        assert_eq!(manager.get_progress().await.len(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_record_is_discarded() {
        let mut store = MemoryStore::new();
        store.set(keys::PROGRESS_DATA, "{not json").await.unwrap();

        let mut manager = StoreManager::new(store.clone());
        assert!(manager.get_progress().await.is_empty());
        assert_eq!(store.get(keys::PROGRESS_DATA).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_quota_failure_reports_false() {
        let mut manager = StoreManager::new(MemoryStore::new().with_quota(16));
        assert!(!manager.save_user_config(&config()).await);
        assert_eq!(manager.get_user_config().await, None);
    }

    #[tokio::test]
    async fn test_clear_all_keeps_foreign_keys() {
        let mut store = MemoryStore::new();
        store.set("otherApp", "1").await.unwrap();

        let mut manager = StoreManager::new(store.clone());
        assert!(manager.save_user_config(&config()).await);
        assert!(manager.save_selected_level(ExamLevel::Extended).await);
        assert!(manager.clear_all().await);

        assert_eq!(store.keys().await.unwrap(), vec!["otherApp".to_string()]);
    }

    #[tokio::test]
    async fn test_export_then_import_into_fresh_store() {
        let mut source = StoreManager::new(MemoryStore::new());
        source.save_user_config(&config()).await;
        source.save_selected_level(ExamLevel::Extended).await;
        let mut progress = ProgressStore::new();
        progress.entry(week(1)).set_quiz_score(75.0, ["w1pr2".to_string()]);
        source.save_progress(&progress).await;

        let now = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();
        let json = source.export_data(now).await.unwrap();

        let mut target = StoreManager::new(MemoryStore::new());
        assert!(target.import_data(&json).await);
        assert_eq!(target.get_user_config().await, Some(config()));
        assert_eq!(target.get_progress().await, progress);
        assert_eq!(target.get_selected_level().await, ExamLevel::Extended);
    }

    #[tokio::test]
    async fn test_import_partial_and_invalid() {
        let mut manager = StoreManager::new(MemoryStore::new());
        assert!(!manager.import_data("not json").await);

        assert!(manager.import_data(r#"{"selectedLevel": "pr"}"#).await);
        assert_eq!(manager.get_selected_level().await, ExamLevel::Extended);
        assert_eq!(manager.get_user_config().await, None);
    }
}
