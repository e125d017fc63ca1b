//! Everything the status view needs, computed in one pass.

use chrono::NaiveDate;
use examplan_core::{ProgressStore, UserConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregator::{overall_progress, weeks_with_progress, OverallProgress, ProgressBand};
use crate::delta::{calculate_progress_delta, ProgressDelta};
use crate::estimator::{predict_completion, CompletionPrediction};
use crate::recommend::{generate_recommendations, weak_areas, Recommendation, WeakArea};
use crate::tracker::{calculate_time_stats, TimeStats};

/// Snapshot of the progress engine for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Aggregated progress
    pub overall: OverallProgress,
    /// Time statistics, absent without a configuration
    pub time: Option<TimeStats>,
    /// Actual versus expected, absent without time statistics
    pub delta: Option<ProgressDelta>,
    /// Ordered recommendations
    pub recommendations: Vec<Recommendation>,
    /// Weeks with any progress
    pub weeks_with_progress: u32,
    /// Colour band of the overall progress
    pub band: ProgressBand,
    /// Reached weeks below 70%
    pub weak_areas: Vec<WeakArea>,
    /// Finish estimate at the current pace
    pub prediction: Option<CompletionPrediction>,
}

impl Dashboard {
    /// Compute the dashboard for `today`.
    pub fn build(config: Option<&UserConfig>, store: &ProgressStore, today: NaiveDate) -> Self {
        let overall = overall_progress(store);
        let time = calculate_time_stats(config, today);
        let delta = calculate_progress_delta(&overall, time.as_ref());
        let recommendations = generate_recommendations(&overall, time.as_ref(), delta.as_ref());
        let current_week = time.as_ref().map_or(0, |t| t.current_week);
        let weak_areas = weak_areas(&overall, current_week);
        let prediction = predict_completion(&overall, time.as_ref(), today);

        debug!(
            average = overall.average_progress,
            current_week,
            recommendations = recommendations.len(),
            "Built dashboard"
        );

        Self {
            band: ProgressBand::for_progress(overall.average_progress),
            weeks_with_progress: weeks_with_progress(store),
            overall,
            time,
            delta,
            recommendations,
            weak_areas,
            prediction,
        }
    }
}
