//! Backup document exchanged by export and import.

use examplan_core::{ExamLevel, ProgressStore, Time, UserConfig};
use serde::{Deserialize, Serialize};

/// Every application record in one JSON document.
///
/// Sections missing from an imported document are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// User configuration
    #[serde(default)]
    pub user_config: Option<UserConfig>,

    /// Progress of all weeks
    #[serde(default)]
    pub progress_data: Option<ProgressStore>,

    /// Selected exam level
    #[serde(default)]
    pub selected_level: Option<ExamLevel>,

    /// When the backup was written
    #[serde(default)]
    pub export_date: Option<Time>,
}
