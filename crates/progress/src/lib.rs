//! Progress engine
//!
//! Turns the stored per-week records and the exam date into percentages,
//! time statistics, a plan delta, recommendations and a finish estimate.
//! Everything here is pure; `today` is always passed in.

#![warn(missing_docs)]

pub mod aggregator;
pub mod tracker;
pub mod delta;
pub mod recommend;
pub mod estimator;
pub mod dashboard;

pub use aggregator::{
    overall_progress, progress_by_week, week_progress_percent, weeks_with_progress,
    OverallProgress, ProgressBand, WeekSummary,
};
pub use tracker::{calculate_time_stats, TimeStats};
pub use delta::{calculate_progress_delta, progress_delta, DeltaStatus, ProgressDelta};
pub use recommend::{
    generate_recommendations, weak_areas, Priority, Recommendation, RecommendationKind, WeakArea,
};
pub use estimator::{predict_completion, CompletionPrediction};
pub use dashboard::Dashboard;
