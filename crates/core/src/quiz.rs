//! Quiz grading and retry selection.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier, remembered when answered incorrectly
    pub id: String,

    /// Question text
    #[serde(default)]
    pub text: String,

    /// How the question is answered
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Answer format of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuestionKind {
    /// Pick one of the options; must equal `correct` exactly.
    #[serde(rename = "radio")]
    Choice {
        /// Options offered
        options: Vec<String>,
        /// The right option
        correct: String,
    },
    /// Free text; compared trimmed and case-insensitively.
    #[serde(rename = "text")]
    Text {
        /// Expected answer
        correct: String,
    },
}

impl Question {
    /// Check an answer. `None` means the question was left unanswered.
    pub fn check(&self, answer: &str) -> Option<bool> {
        let answer = answer.trim();
        if answer.is_empty() {
            return None;
        }
        let correct = match &self.kind {
            QuestionKind::Choice { correct, .. } => answer == correct.trim(),
            QuestionKind::Text { correct } => answer.to_lowercase() == correct.trim().to_lowercase(),
        };
        Some(correct)
    }
}

/// A quiz together with the user's answers, keyed by question id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizSheet {
    /// Question pool of the week
    pub questions: Vec<Question>,

    /// Submitted answers
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

/// Result of grading one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOutcome {
    /// Correct answers
    pub correct: usize,
    /// Questions that received an answer
    pub answered: usize,
    /// Questions in the attempt
    pub total: usize,
    /// `round(correct / total * 100)`, 0 for an empty attempt
    pub score: u8,
    /// Questions still to retry after this attempt
    pub incorrect_questions: BTreeSet<String>,
}

/// Questions of an attempt: the whole pool, or in retry mode only the
/// questions remembered as incorrect.
pub fn select_questions<'a>(
    pool: &'a [Question],
    retry: Option<&BTreeSet<String>>,
) -> Vec<&'a Question> {
    match retry {
        Some(incorrect) => pool.iter().filter(|q| incorrect.contains(&q.id)).collect(),
        None => pool.iter().collect(),
    }
}

/// Grade an attempt.
///
/// Questions answered correctly leave the retry set, questions answered
/// incorrectly join it, and unanswered questions keep their previous state
/// while still counting towards the total.
pub fn grade(
    questions: &[&Question],
    answers: &BTreeMap<String, String>,
    previous_incorrect: &BTreeSet<String>,
) -> QuizOutcome {
    let mut correct = 0;
    let mut answered = 0;
    let mut incorrect_questions = previous_incorrect.clone();

    for question in questions {
        let verdict = answers.get(&question.id).and_then(|a| question.check(a));
        match verdict {
            Some(true) => {
                answered += 1;
                correct += 1;
                incorrect_questions.remove(&question.id);
            }
            Some(false) => {
                answered += 1;
                incorrect_questions.insert(question.id.clone());
            }
            None => {}
        }
    }

    let total = questions.len();
    let score = if total > 0 {
        (correct as f64 / total as f64 * 100.0).round() as u8
    } else {
        0
    };

    QuizOutcome {
        correct,
        answered,
        total,
        score,
        incorrect_questions,
    }
}
