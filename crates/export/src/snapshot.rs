//! Statistics snapshot exported as JSON.

use examplan_core::{Time, UserConfig};
use examplan_progress::{Dashboard, OverallProgress, ProgressDelta, Recommendation, TimeStats};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The computed statistics at one moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    /// Aggregated progress
    pub overall: OverallProgress,
    /// Time statistics
    pub time: Option<TimeStats>,
    /// Actual versus expected
    pub delta: Option<ProgressDelta>,
    /// Ordered recommendations
    pub recommendations: Vec<Recommendation>,
    /// User configuration
    pub user_config: Option<UserConfig>,
    /// When the snapshot was taken
    pub export_date: Time,
}

impl StatisticsSnapshot {
    /// Take a snapshot of a dashboard.
    pub fn from_dashboard(dashboard: &Dashboard, config: Option<&UserConfig>, now: Time) -> Self {
        Self {
            overall: dashboard.overall.clone(),
            time: dashboard.time.clone(),
            delta: dashboard.delta.clone(),
            recommendations: dashboard.recommendations.clone(),
            user_config: config.cloned(),
            export_date: now,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot written by [`StatisticsSnapshot::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use examplan_core::{ProgressStore, WeekId, WeekProgress};

    #[test]
    fn test_json_round_trip() {
        let config: UserConfig = serde_json::from_str(
            r#"{"name":"Anna","examYear":2026,"examDate":"2026-05-12","level":"pp",
                "configComplete":true,"createdAt":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let mut store = ProgressStore::new();
        store.insert(
            WeekId::new(2).unwrap(),
            WeekProgress {
                theory_read: true,
                quiz_score: Some(37.5),
                incorrect_questions: ["q1".to_string()].into_iter().collect(),
            },
        );
        let today = NaiveDate::from_ymd_opt(2026, 4, 7).unwrap();
        let dashboard = Dashboard::build(Some(&config), &store, today);
        let now = Utc.with_ymd_and_hms(2026, 4, 7, 8, 0, 0).unwrap();

        let snapshot = StatisticsSnapshot::from_dashboard(&dashboard, Some(&config), now);
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"exportDate\""));
        assert!(json.contains("\"userConfig\""));

        assert_eq!(StatisticsSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(StatisticsSnapshot::from_json("{not json").is_err());
    }
}
