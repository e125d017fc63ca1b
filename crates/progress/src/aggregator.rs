//! Per-week and overall progress.
//!
//! A week is worth 100 points: 20 for reading the theory and up to 80 for
//! the quiz, proportional to its score. The overall figure averages all
//! ten weeks, so weeks not reached yet pull it down. It measures how much
//! of the whole plan is done, not how well the attempted weeks went.

use examplan_core::constants::{QUIZ_PROGRESS_WEIGHT, THEORY_PROGRESS_WEIGHT};
use examplan_core::{topic_for_week, ProgressStore, WeekId, WeekProgress, WEEKS_TOTAL};
use serde::{Deserialize, Serialize};

/// Progress of a single week, `0..=100`.
pub fn week_progress_percent(record: &WeekProgress) -> u8 {
    let mut points = 0.0;
    if record.theory_read {
        points += THEORY_PROGRESS_WEIGHT;
    }
    if let Some(score) = recorded_score(record) {
        points += score * (QUIZ_PROGRESS_WEIGHT / 100.0);
    }
    points.round().clamp(0.0, 100.0) as u8
}

/// Quiz score if one was recorded, clamped to a percentage.
fn recorded_score(record: &WeekProgress) -> Option<f64> {
    record
        .quiz_score
        .filter(|score| !score.is_nan())
        .map(|score| score.clamp(0.0, 100.0))
}

/// One row of the per-week breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    /// 1-based week number
    pub week_number: u32,
    /// Topic of the week
    pub topic: String,
    /// Week progress in percent
    pub progress: u8,
    /// Theory marked as read
    pub theory_read: bool,
    /// Latest quiz score
    pub quiz_score: Option<f64>,
    /// Questions to retry
    pub incorrect_questions: Vec<String>,
}

/// Aggregated progress over the whole plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallProgress {
    /// Mean of all week percentages, untouched weeks counting as 0
    pub average_progress: u8,
    /// Weeks at 100%
    pub completed_weeks: u32,
    /// Weeks in the plan
    pub total_weeks: u32,
    /// Weeks with theory read
    pub theory_read_count: u32,
    /// Weeks with a recorded quiz score
    pub quizzes_completed_count: u32,
    /// Mean of recorded quiz scores, 0 when there are none
    pub average_quiz_score: u8,
    /// Breakdown in week order
    pub per_week: Vec<WeekSummary>,
}

/// Per-week breakdown in week order.
pub fn progress_by_week(store: &ProgressStore) -> Vec<WeekSummary> {
    WeekId::all()
        .map(|week| {
            let record = store.week_or_default(week);
            WeekSummary {
                week_number: week.number(),
                topic: topic_for_week(week.number()).to_string(),
                progress: week_progress_percent(&record),
                theory_read: record.theory_read,
                quiz_score: recorded_score(&record),
                incorrect_questions: record.incorrect_questions.into_iter().collect(),
            }
        })
        .collect()
}

/// Aggregate the progress of every week.
pub fn overall_progress(store: &ProgressStore) -> OverallProgress {
    let per_week = progress_by_week(store);

    let total: u32 = per_week.iter().map(|w| u32::from(w.progress)).sum();
    let completed_weeks = per_week.iter().filter(|w| w.progress >= 100).count() as u32;
    let theory_read_count = per_week.iter().filter(|w| w.theory_read).count() as u32;

    let scores: Vec<f64> = per_week.iter().filter_map(|w| w.quiz_score).collect();
    let average_quiz_score = if scores.is_empty() {
        0
    } else {
        (scores.iter().sum::<f64>() / scores.len() as f64).round() as u8
    };

    OverallProgress {
        average_progress: (f64::from(total) / f64::from(WEEKS_TOTAL)).round() as u8,
        completed_weeks,
        total_weeks: WEEKS_TOTAL,
        theory_read_count,
        quizzes_completed_count: scores.len() as u32,
        average_quiz_score,
        per_week,
    }
}

/// Weeks with any progress at all.
///
/// Shown on the dashboard next to the plan average. Not the same as
/// [`OverallProgress::completed_weeks`], which only counts finished weeks.
pub fn weeks_with_progress(store: &ProgressStore) -> u32 {
    WeekId::all()
        .filter(|week| {
            let record = store.week_or_default(*week);
            record.theory_read || recorded_score(&record).is_some_and(|score| score > 0.0)
        })
        .count() as u32
}

/// Colour band of a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressBand {
    /// 95% and above
    DarkGreen,
    /// 85% and above
    Green,
    /// 70% and above
    LightGreen,
    /// 50% and above
    Yellow,
    /// 30% and above
    Orange,
    /// Below 30%
    Red,
}

impl ProgressBand {
    /// Band for a progress percentage.
    pub fn for_progress(progress: u8) -> Self {
        match progress {
            95.. => ProgressBand::DarkGreen,
            85.. => ProgressBand::Green,
            70.. => ProgressBand::LightGreen,
            50.. => ProgressBand::Yellow,
            30.. => ProgressBand::Orange,
            _ => ProgressBand::Red,
        }
    }

    /// CSS class of the band.
    pub fn css_class(self) -> &'static str {
        match self {
            ProgressBand::DarkGreen => "dark-green",
            ProgressBand::Green => "green",
            ProgressBand::LightGreen => "light-green",
            ProgressBand::Yellow => "yellow",
            ProgressBand::Orange => "orange",
            ProgressBand::Red => "red",
        }
    }

    /// Hex colour of the band.
    pub fn color(self) -> &'static str {
        match self {
            ProgressBand::DarkGreen => "#198754",
            ProgressBand::Green => "#28a745",
            ProgressBand::LightGreen => "#6fbf73",
            ProgressBand::Yellow => "#ffc107",
            ProgressBand::Orange => "#fd7e14",
            ProgressBand::Red => "#dc3545",
        }
    }
}
