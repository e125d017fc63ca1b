//! Per-week CSV.

use examplan_progress::WeekSummary;

/// Header row of the per-week CSV.
pub const CSV_HEADER: &str = "Week,Topic,Progress(%),TheoryRead,QuizScore";

/// Quote a string field, doubling embedded quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// One row per week; the quiz score cell is empty when no quiz was taken.
pub fn weeks_to_csv(weeks: &[WeekSummary]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for week in weeks {
        let theory = if week.theory_read { "Yes" } else { "No" };
        let score = week.quiz_score.map(|s| s.to_string()).unwrap_or_default();
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            week.week_number,
            quote(&week.topic),
            week.progress,
            quote(theory),
            score
        ));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(week_number: u32, topic: &str, quiz_score: Option<f64>) -> WeekSummary {
        WeekSummary {
            week_number,
            topic: topic.to_string(),
            progress: 60,
            theory_read: quiz_score.is_some(),
            quiz_score,
            incorrect_questions: Vec::new(),
        }
    }

    #[test]
    fn test_rows() {
        let csv = weeks_to_csv(&[
            summary(1, "Real Numbers and Sets", Some(50.0)),
            summary(2, "Algebraic Expressions", None),
        ]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "1,\"Real Numbers and Sets\",60,\"Yes\",50");
        assert_eq!(lines[2], "2,\"Algebraic Expressions\",60,\"No\",");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_embedded_quotes_and_commas() {
        let csv = weeks_to_csv(&[summary(3, "Say \"hi\", then go", Some(12.5))]);
        assert!(csv.contains("3,\"Say \"\"hi\"\", then go\",60,\"Yes\",12.5\n"));
    }
}
