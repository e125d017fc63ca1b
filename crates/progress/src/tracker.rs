//! Time statistics of the study plan.

use chrono::NaiveDate;
use examplan_core::schedule::{
    current_week_index, days_between, expected_progress_percent, study_start,
};
use examplan_core::{UserConfig, TOTAL_STUDY_DAYS};
use serde::{Deserialize, Serialize};

/// Where `today` falls in the study plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeStats {
    /// Days left until the exam, never negative
    pub days_until_exam: u32,
    /// Current plan week (0 before start, 11 after the exam)
    pub current_week: u32,
    /// Linear expected progress in percent
    pub expected_progress: u8,
    /// Days since the plan started, 0 before the start
    pub days_into_study: u32,
    /// Length of the plan in days
    pub total_study_days: u32,
    /// First day of the plan
    pub study_start_date: NaiveDate,
    /// Exam day
    pub exam_date: NaiveDate,
}

impl TimeStats {
    /// Time statistics for an exam date.
    pub fn for_exam(exam_date: NaiveDate, today: NaiveDate) -> Self {
        let start = study_start(exam_date);
        let current_week = current_week_index(exam_date, today);
        let days_into_study = if current_week > 0 {
            days_between(start, today).max(0)
        } else {
            0
        };

        Self {
            days_until_exam: clamp_days(days_between(today, exam_date)),
            current_week,
            expected_progress: expected_progress_percent(exam_date, today),
            days_into_study: clamp_days(days_into_study),
            total_study_days: TOTAL_STUDY_DAYS,
            study_start_date: start,
            exam_date,
        }
    }
}

fn clamp_days(days: i64) -> u32 {
    days.clamp(0, i64::from(u32::MAX)) as u32
}

/// Time statistics for the configured exam; `None` when nothing is configured.
pub fn calculate_time_stats(config: Option<&UserConfig>, today: NaiveDate) -> Option<TimeStats> {
    config.map(|config| TimeStats::for_exam(config.exam_date, today))
}
