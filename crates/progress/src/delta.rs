//! Actual versus expected progress.

use serde::{Deserialize, Serialize};

use crate::aggregator::OverallProgress;
use crate::tracker::TimeStats;

/// A delta beyond this many points, either way, leaves "on track".
pub const DELTA_TOLERANCE: i32 = 10;

/// How actual progress compares to the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeltaStatus {
    /// More than 10 points ahead
    Ahead,
    /// Within 10 points
    OnTrack,
    /// More than 10 points behind
    Behind,
}

impl DeltaStatus {
    /// Status for a delta.
    pub fn for_delta(delta: i32) -> Self {
        if delta > DELTA_TOLERANCE {
            DeltaStatus::Ahead
        } else if delta < -DELTA_TOLERANCE {
            DeltaStatus::Behind
        } else {
            DeltaStatus::OnTrack
        }
    }

    /// Advisory message shown with the status.
    pub fn message(self) -> &'static str {
        match self {
            DeltaStatus::Ahead => "Great work! You are ahead of the plan!",
            DeltaStatus::OnTrack => "You are on the right track!",
            DeltaStatus::Behind => "You need to speed up to catch up.",
        }
    }

    /// Status name as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            DeltaStatus::Ahead => "ahead",
            DeltaStatus::OnTrack => "on-track",
            DeltaStatus::Behind => "behind",
        }
    }
}

/// Difference between actual and expected progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDelta {
    /// Actual overall progress
    pub actual_progress: u8,
    /// Expected progress for today
    pub expected_progress: u8,
    /// `actual - expected`
    pub delta: i32,
    /// Derived status
    pub status: DeltaStatus,
    /// Advisory message of the status
    pub message: String,
}

/// Compare actual and expected progress.
pub fn progress_delta(actual: u8, expected: u8) -> ProgressDelta {
    let delta = i32::from(actual) - i32::from(expected);
    let status = DeltaStatus::for_delta(delta);
    ProgressDelta {
        actual_progress: actual,
        expected_progress: expected,
        delta,
        status,
        message: status.message().to_string(),
    }
}

/// Delta of the overall progress; `None` without time statistics.
pub fn calculate_progress_delta(
    overall: &OverallProgress,
    time: Option<&TimeStats>,
) -> Option<ProgressDelta> {
    time.map(|time| progress_delta(overall.average_progress, time.expected_progress))
}
