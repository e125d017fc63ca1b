//! Per-week progress records.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::id::WeekId;
use crate::quiz::QuizOutcome;

/// Progress of one study week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekProgress {
    /// Theory marked as read. Only ever goes from false to true.
    #[serde(default)]
    pub theory_read: bool,

    /// Latest quiz score in percent, absent until a quiz is submitted
    #[serde(default)]
    pub quiz_score: Option<f64>,

    /// Questions to retry
    #[serde(default, alias = "incorrectQuestionIds")]
    pub incorrect_questions: BTreeSet<String>,
}

impl WeekProgress {
    /// Mark the theory as read. Returns `true` if this changed anything.
    pub fn mark_theory_read(&mut self) -> bool {
        let changed = !self.theory_read;
        self.theory_read = true;
        changed
    }

    /// Store the result of a graded quiz attempt.
    pub fn apply_quiz(&mut self, outcome: &QuizOutcome) {
        self.quiz_score = Some(f64::from(outcome.score));
        self.incorrect_questions = outcome.incorrect_questions.clone();
    }

    /// Store a quiz score entered directly, with the questions missed.
    pub fn set_quiz_score(&mut self, score: f64, incorrect: impl IntoIterator<Item = String>) {
        self.quiz_score = Some(score.clamp(0.0, 100.0));
        self.incorrect_questions = incorrect.into_iter().collect();
    }
}

/// Progress of all weeks, keyed by `week-N`.
///
/// Sparse: a week without an entry has not been touched yet. The store
/// never fills in defaults itself; [`ProgressStore::get`] returns `None`
/// for untouched weeks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressStore {
    weeks: BTreeMap<String, WeekProgress>,
}

impl ProgressStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record of a week, if it was ever touched.
    pub fn get(&self, week: WeekId) -> Option<&WeekProgress> {
        self.weeks.get(&week.key())
    }

    /// Record of a week with defaults for untouched weeks: theory unread,
    /// no quiz score, nothing to retry. This is the only place defaults
    /// are filled in.
    pub fn week_or_default(&self, week: WeekId) -> WeekProgress {
        self.get(week).cloned().unwrap_or_default()
    }

    /// Record of a week, created on first use.
    pub fn entry(&mut self, week: WeekId) -> &mut WeekProgress {
        self.weeks.entry(week.key()).or_default()
    }

    /// Replace a week's record.
    pub fn insert(&mut self, week: WeekId, progress: WeekProgress) {
        self.weeks.insert(week.key(), progress);
    }

    /// Mark a week's theory as read. Returns `true` if this changed anything.
    pub fn mark_theory_read(&mut self, week: WeekId) -> bool {
        self.entry(week).mark_theory_read()
    }

    /// Store a graded quiz attempt for a week.
    pub fn record_quiz(&mut self, week: WeekId, outcome: &QuizOutcome) {
        self.entry(week).apply_quiz(outcome);
    }

    /// Number of touched weeks.
    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    /// True when no week was touched.
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(n: u32) -> WeekId {
        WeekId::new(n).unwrap()
    }

    #[test]
    fn test_entries_created_lazily() {
        let mut store = ProgressStore::new();
        assert!(store.get(week(2)).is_none());

        assert!(store.mark_theory_read(week(2)));
        assert!(!store.mark_theory_read(week(2)));
        assert_eq!(store.len(), 1);
        assert!(store.get(week(2)).unwrap().theory_read);
    }

    #[test]
    fn test_quiz_outcome_replaces_score_and_retry_set() {
        let mut store = ProgressStore::new();
        store.entry(week(1)).set_quiz_score(40.0, ["q1".to_string(), "q2".to_string()]);

        let outcome = QuizOutcome {
            correct: 2,
            answered: 2,
            total: 2,
            score: 100,
            incorrect_questions: BTreeSet::new(),
        };
        store.record_quiz(week(1), &outcome);

        let record = store.get(week(1)).unwrap();
        assert_eq!(record.quiz_score, Some(100.0));
        assert!(record.incorrect_questions.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let mut store = ProgressStore::new();
        store.entry(week(3)).set_quiz_score(80.0, ["w3q1".to_string()]);

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "week-3": {
                    "theoryRead": false,
                    "quizScore": 80.0,
                    "incorrectQuestions": ["w3q1"]
                }
            })
        );
    }

    #[test]
    fn test_reads_partial_records() {
        let store: ProgressStore =
            serde_json::from_str(r#"{"week-1": {"theoryRead": true, "quizScore": null}}"#).unwrap();
        let record = store.get(week(1)).unwrap();
        assert!(record.theory_read);
        assert_eq!(record.quiz_score, None);
        assert!(record.incorrect_questions.is_empty());
    }
}
