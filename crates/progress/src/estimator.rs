//! Completion date estimation.

use chrono::{Days, NaiveDate};
use examplan_core::schedule::format_iso;
use serde::{Deserialize, Serialize};

use crate::aggregator::OverallProgress;
use crate::tracker::TimeStats;

/// Estimated finish of the whole plan at the current pace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionPrediction {
    /// Progress points gained per study day so far
    pub pace_per_day: f64,
    /// Days still needed at that pace
    pub days_needed: u32,
    /// Date the plan would be finished
    pub predicted_date: NaiveDate,
    /// Whether that date is on or before the exam
    pub will_finish_on_time: bool,
    /// Human readable summary
    pub message: String,
}

/// Project the current pace forward.
///
/// Returns `None` when there is no pace to project: no time statistics,
/// the plan has not started, or nothing has been done yet.
pub fn predict_completion(
    overall: &OverallProgress,
    time: Option<&TimeStats>,
    today: NaiveDate,
) -> Option<CompletionPrediction> {
    let time = time?;
    if time.days_into_study == 0 || overall.average_progress == 0 {
        return None;
    }

    let done = f64::from(overall.average_progress);
    let days_into_study = f64::from(time.days_into_study);
    let pace_per_day = done / days_into_study;
    let days_needed = ((100.0 - done).max(0.0) * days_into_study / done).ceil() as u32;

    let predicted_date = today.checked_add_days(Days::new(u64::from(days_needed)))?;
    let will_finish_on_time = predicted_date <= time.exam_date;
    let message = if will_finish_on_time {
        format!(
            "At your current pace you will finish by {}, before the exam.",
            format_iso(predicted_date)
        )
    } else {
        format!(
            "At your current pace you will finish on {}, after the exam on {}. Speed up!",
            format_iso(predicted_date),
            format_iso(time.exam_date)
        )
    };

    Some(CompletionPrediction {
        pace_per_day,
        days_needed,
        predicted_date,
        will_finish_on_time,
        message,
    })
}
