//! Study recommendations and weak areas.
//!
//! Each rule is checked on its own and any number may fire. The result is
//! ordered by priority; rules of equal priority keep their rule order.

use serde::{Deserialize, Serialize};

use crate::aggregator::OverallProgress;
use crate::delta::{ProgressDelta, DELTA_TOLERANCE};
use crate::tracker::TimeStats;

/// Quiz average under which scores count as low.
pub const LOW_QUIZ_SCORE: u8 = 70;

/// Quiz average needed for the congratulation.
pub const HIGH_QUIZ_SCORE: u8 = 80;

/// Days before the exam from which it counts as imminent.
pub const EXAM_IMMINENT_DAYS: u32 = 14;

/// Week progress under which a reached week is a weak area.
pub const WEAK_AREA_THRESHOLD: u8 = 70;

const DASHBOARD: &str = "dashboard";

/// Tone of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    /// Needs attention
    Warning,
    /// Worth knowing
    Info,
    /// Praise
    Success,
}

/// Urgency of a recommendation. Orders high before medium before low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Rank 1
    High,
    /// Rank 2
    Medium,
    /// Rank 3
    Low,
}

impl Priority {
    /// Sort rank, 1 is most urgent.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

/// A piece of advice for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Tone
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    /// Urgency
    pub priority: Priority,
    /// Short title
    pub title: String,
    /// Full message
    pub message: String,
    /// Label of the suggested action
    pub action_label: Option<String>,
    /// Where the action leads
    pub action_target: Option<String>,
}

impl Recommendation {
    fn new(kind: RecommendationKind, priority: Priority, title: &str, message: String) -> Self {
        Self {
            kind,
            priority,
            title: title.to_string(),
            message,
            action_label: None,
            action_target: None,
        }
    }

    fn with_action(mut self, label: &str) -> Self {
        self.action_label = Some(label.to_string());
        self.action_target = Some(DASHBOARD.to_string());
        self
    }
}

/// Recommendations for the current state, most urgent first.
///
/// Without time statistics the current week counts as 0 and there is no
/// delta, so only the quiz score rule can fire.
pub fn generate_recommendations(
    overall: &OverallProgress,
    time: Option<&TimeStats>,
    delta: Option<&ProgressDelta>,
) -> Vec<Recommendation> {
    let current_week = time.map_or(0, |t| t.current_week);
    let mut recommendations = Vec::new();

    if let Some(delta) = delta.filter(|d| d.delta < -DELTA_TOLERANCE) {
        recommendations.push(
            Recommendation::new(
                RecommendationKind::Warning,
                Priority::High,
                "You are behind the plan",
                format!(
                    "Your progress ({}%) is below the expected {}%. Spend more time studying.",
                    delta.actual_progress, delta.expected_progress
                ),
            )
            .with_action("Open the dashboard"),
        );
    }

    let incomplete: Vec<String> = overall
        .per_week
        .iter()
        .filter(|w| w.week_number <= current_week && w.progress < 100)
        .map(|w| w.week_number.to_string())
        .collect();
    if !incomplete.is_empty() {
        recommendations.push(
            Recommendation::new(
                RecommendationKind::Info,
                Priority::Medium,
                "Unfinished weeks",
                format!(
                    "You have unfinished weeks: {}. Consider completing them.",
                    incomplete.join(", ")
                ),
            )
            .with_action("See details"),
        );
    }

    if overall.average_quiz_score > 0 && overall.average_quiz_score < LOW_QUIZ_SCORE {
        recommendations.push(
            Recommendation::new(
                RecommendationKind::Warning,
                Priority::High,
                "Low quiz scores",
                format!(
                    "Your quiz average is {}%. Review the material and try again.",
                    overall.average_quiz_score
                ),
            )
            .with_action("Retry incorrect questions"),
        );
    }

    if overall.theory_read_count < current_week {
        recommendations.push(
            Recommendation::new(
                RecommendationKind::Info,
                Priority::Medium,
                "Read the theory",
                "You have not read the theory for every week so far. Theory is the foundation!"
                    .to_string(),
            )
            .with_action("Go study"),
        );
    }

    let ahead = delta.is_some_and(|d| d.delta > DELTA_TOLERANCE);
    if ahead && overall.average_quiz_score >= HIGH_QUIZ_SCORE {
        recommendations.push(Recommendation::new(
            RecommendationKind::Success,
            Priority::Low,
            "Great work!",
            "You are ahead of the plan with high scores! Keep it up!".to_string(),
        ));
    }

    if let Some(days) = time
        .map(|t| t.days_until_exam)
        .filter(|days| (1..=EXAM_IMMINENT_DAYS).contains(days))
    {
        recommendations.push(
            Recommendation::new(
                RecommendationKind::Warning,
                Priority::High,
                "The exam is close!",
                format!("Only {} days left until the exam. Focus on revision.", days),
            )
            .with_action("See progress"),
        );
    }

    // stable: equal priorities keep rule order
    recommendations.sort_by_key(|r| r.priority.rank());
    recommendations
}

/// A reached week that needs more work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakArea {
    /// 1-based week number
    pub week_number: u32,
    /// Topic of the week
    pub topic: String,
    /// Week progress in percent
    pub progress: u8,
    /// What to do next
    pub suggestion: String,
}

/// Weeks up to `current_week` with progress under [`WEAK_AREA_THRESHOLD`].
pub fn weak_areas(overall: &OverallProgress, current_week: u32) -> Vec<WeakArea> {
    overall
        .per_week
        .iter()
        .filter(|w| w.week_number <= current_week && w.progress < WEAK_AREA_THRESHOLD)
        .map(|w| WeakArea {
            week_number: w.week_number,
            topic: w.topic.clone(),
            progress: w.progress,
            suggestion: if w.theory_read {
                "Review the theory and retake the quiz.".to_string()
            } else {
                "Start by reading the theory.".to_string()
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::overall_progress;
    use crate::delta::progress_delta;
    use chrono::NaiveDate;
    use examplan_core::{ProgressStore, WeekId, WeekProgress};

    fn time_stats(current_week: u32, days_until_exam: u32) -> TimeStats {
        let exam = NaiveDate::from_ymd_opt(2026, 5, 12).unwrap();
        TimeStats {
            days_until_exam,
            current_week,
            expected_progress: 0,
            days_into_study: 0,
            total_study_days: 70,
            study_start_date: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
            exam_date: exam,
        }
    }

    fn store(records: &[(u32, bool, Option<f64>)]) -> ProgressStore {
        let mut store = ProgressStore::new();
        for &(week, theory_read, quiz_score) in records {
            store.insert(
                WeekId::new(week).unwrap(),
                WeekProgress {
                    theory_read,
                    quiz_score,
                    ..Default::default()
                },
            );
        }
        store
    }

    fn titles(recommendations: &[Recommendation]) -> Vec<&str> {
        recommendations.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_incomplete_weeks_listed() {
        // theory read + 37.5% quiz = 50% for weeks 1-3
        let overall = overall_progress(&store(&[
            (1, true, Some(37.5)),
            (2, true, Some(37.5)),
            (3, true, Some(37.5)),
        ]));
        let time = time_stats(3, 40);
        let recs = generate_recommendations(&overall, Some(&time), None);

        let incomplete = recs.iter().find(|r| r.title == "Unfinished weeks").unwrap();
        assert_eq!(incomplete.priority, Priority::Medium);
        assert!(incomplete.message.contains("1, 2, 3"));
        assert_eq!(incomplete.action_target.as_deref(), Some("dashboard"));
    }

    #[test]
    fn test_rules_fire_together_sorted_by_priority() {
        let overall = overall_progress(&store(&[(1, false, Some(40.0))]));
        let time = time_stats(10, 5);
        let delta = progress_delta(overall.average_progress, 95);
        let recs = generate_recommendations(&overall, Some(&time), Some(&delta));

        assert_eq!(
            titles(&recs),
            vec![
                "You are behind the plan",
                "Low quiz scores",
                "The exam is close!",
                "Unfinished weeks",
                "Read the theory",
            ]
        );
    }

    #[test]
    fn test_congratulations_without_action() {
        let all: Vec<(u32, bool, Option<f64>)> = (1..=10).map(|w| (w, true, Some(90.0))).collect();
        let overall = overall_progress(&store(&all));
        let time = time_stats(0, 60);
        let delta = progress_delta(overall.average_progress, 20);
        let recs = generate_recommendations(&overall, Some(&time), Some(&delta));

        assert_eq!(titles(&recs), vec!["Great work!"]);
        assert_eq!(recs[0].kind, RecommendationKind::Success);
        assert_eq!(recs[0].action_label, None);
    }

    #[test]
    fn test_exam_day_itself_is_not_imminent() {
        let overall = overall_progress(&ProgressStore::new());
        let time = time_stats(0, 0);
        let recs = generate_recommendations(&overall, Some(&time), None);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_exam_imminent_boundaries() {
        let overall = overall_progress(&ProgressStore::new());
        for (days, fires) in [(1, true), (14, true), (15, false)] {
            let time = time_stats(0, days);
            let recs = generate_recommendations(&overall, Some(&time), None);
            assert_eq!(titles(&recs) == vec!["The exam is close!"], fires, "days = {}", days);
        }
    }

    #[test]
    fn test_behind_boundaries() {
        let overall = overall_progress(&ProgressStore::new());
        let time = time_stats(0, 60);

        let on_edge = progress_delta(0, 10);
        assert!(generate_recommendations(&overall, Some(&time), Some(&on_edge)).is_empty());

        let past_edge = progress_delta(0, 11);
        let recs = generate_recommendations(&overall, Some(&time), Some(&past_edge));
        assert_eq!(titles(&recs), vec!["You are behind the plan"]);
    }

    #[test]
    fn test_congratulations_needs_high_quiz_average() {
        let time = time_stats(0, 60);

        let good: Vec<(u32, bool, Option<f64>)> = (1..=10).map(|w| (w, true, Some(79.0))).collect();
        let overall = overall_progress(&store(&good));
        assert_eq!(overall.average_quiz_score, 79);
        let delta = progress_delta(overall.average_progress, 50);
        assert!(delta.delta > 10);
        assert!(generate_recommendations(&overall, Some(&time), Some(&delta)).is_empty());

        let great: Vec<(u32, bool, Option<f64>)> = (1..=10).map(|w| (w, true, Some(80.0))).collect();
        let overall = overall_progress(&store(&great));
        let delta = progress_delta(overall.average_progress, 50);
        let recs = generate_recommendations(&overall, Some(&time), Some(&delta));
        assert_eq!(titles(&recs), vec!["Great work!"]);
    }

    #[test]
    fn test_without_time_stats() {
        let overall = overall_progress(&store(&[(1, false, Some(50.0))]));
        let recs = generate_recommendations(&overall, None, None);
        assert_eq!(titles(&recs), vec!["Low quiz scores"]);
    }

    #[test]
    fn test_weak_areas() {
        let overall = overall_progress(&store(&[
            (1, true, Some(100.0)),
            (2, true, Some(40.0)),
            (5, false, None),
        ]));
        let weak = weak_areas(&overall, 3);

        let weeks: Vec<u32> = weak.iter().map(|w| w.week_number).collect();
        assert_eq!(weeks, vec![2, 3]);
        assert_eq!(weak[0].suggestion, "Review the theory and retake the quiz.");
        assert_eq!(weak[1].suggestion, "Start by reading the theory.");
    }
}
