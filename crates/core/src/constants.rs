//! Fixed parameters of the study plan.

use crate::config::ExamLevel;

/// Number of study weeks in the plan.
pub const WEEKS_TOTAL: u32 = 10;

/// Days in one study week.
pub const DAYS_PER_WEEK: u32 = 7;

/// Length of the whole plan in days. The plan ends on the exam date.
pub const TOTAL_STUDY_DAYS: u32 = WEEKS_TOTAL * DAYS_PER_WEEK;

/// Points awarded once a week's theory is marked as read.
pub const THEORY_PROGRESS_WEIGHT: f64 = 20.0;

/// Maximum points awarded for a week's quiz (scaled by the quiz score).
pub const QUIZ_PROGRESS_WEIGHT: f64 = 80.0;

/// Exam month (May).
pub const EXAM_MONTH: u32 = 5;

/// The exam falls on this occurrence of a Tuesday in [`EXAM_MONTH`].
pub const EXAM_WEEK_NUMBER: u32 = 2;

/// Shortest accepted user name, after trimming.
pub const MIN_NAME_LENGTH: usize = 2;

/// Longest accepted user name, after trimming.
pub const MAX_NAME_LENGTH: usize = 50;

/// Earliest exam year, relative to the current year.
pub const MIN_YEAR_OFFSET: i32 = 0;

/// Latest exam year, relative to the current year.
pub const MAX_YEAR_OFFSET: i32 = 2;

/// Topic returned for week numbers outside the plan.
pub const UNKNOWN_TOPIC: &str = "Unknown topic";

/// Week topics, shared by both exam levels. Index 0 is week 1.
pub const WEEK_TOPICS: [&str; WEEKS_TOTAL as usize] = [
    "Real Numbers and Sets",
    "Algebraic Expressions and Functions",
    "Linear and Quadratic Functions",
    "Polynomials and Rational Functions",
    "Exponential and Logarithmic Functions",
    "Trigonometry",
    "Sequences",
    "Plane Geometry",
    "Analytic Geometry and Solid Geometry",
    "Statistics and Probability",
];

/// Topic studied in the given week, or [`UNKNOWN_TOPIC`].
pub fn topic_for_week(week_number: u32) -> &'static str {
    match week_number {
        1..=WEEKS_TOTAL => WEEK_TOPICS[(week_number - 1) as usize],
        _ => UNKNOWN_TOPIC,
    }
}

/// Full title of a week, optionally tagged with the exam level.
pub fn week_title(week_number: u32, level: Option<ExamLevel>) -> String {
    let mut title = format!("Week {}: {}", week_number, topic_for_week(week_number));
    if let Some(level) = level {
        title.push_str(&format!(" ({})", level.code().to_uppercase()));
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_bounds() {
        assert_eq!(topic_for_week(1), "Real Numbers and Sets");
        assert_eq!(topic_for_week(10), "Statistics and Probability");
        assert_eq!(topic_for_week(0), UNKNOWN_TOPIC);
        assert_eq!(topic_for_week(11), UNKNOWN_TOPIC);
    }

    #[test]
    fn test_week_title_with_level() {
        assert_eq!(week_title(6, None), "Week 6: Trigonometry");
        assert_eq!(
            week_title(6, Some(ExamLevel::Extended)),
            "Week 6: Trigonometry (PR)"
        );
    }
}
