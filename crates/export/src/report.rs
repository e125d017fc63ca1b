//! Plain text progress report.

use examplan_core::{Time, UserConfig, WEEKS_TOTAL};
use examplan_progress::{OverallProgress, ProgressDelta, TimeStats};

const DONE: char = '✓';
const PARTIAL: char = '◐';
const NOT_STARTED: char = '○';

fn status_glyph(progress: u8) -> char {
    match progress {
        100.. => DONE,
        50.. => PARTIAL,
        _ => NOT_STARTED,
    }
}

/// Render the sectioned text report.
///
/// Sections without data (no configuration, no time statistics, no delta)
/// are left out. `generated_at` goes into the footer.
pub fn text_report(
    config: Option<&UserConfig>,
    overall: &OverallProgress,
    time: Option<&TimeStats>,
    delta: Option<&ProgressDelta>,
    generated_at: Time,
) -> String {
    let mut lines = vec!["=== PROGRESS REPORT - EXAMPLAN ===".to_string(), String::new()];

    if let Some(config) = config {
        lines.push(format!("Name: {}", config.name));
        lines.push(format!("Level: {}", config.level.code().to_uppercase()));
        lines.push(format!("Exam date: {}", config.exam_date.format("%Y-%m-%d")));
        lines.push(String::new());
    }

    if let Some(time) = time {
        lines.push("--- TIME ---".to_string());
        lines.push(format!("Days until exam: {}", time.days_until_exam));
        lines.push(format!("Current week: {}/{}", time.current_week, WEEKS_TOTAL));
        lines.push(format!("Expected progress: {}%", time.expected_progress));
        lines.push(String::new());
    }

    lines.push("--- OVERALL ---".to_string());
    lines.push(format!("Average progress: {}%", overall.average_progress));
    lines.push(format!("Completed weeks: {}/{}", overall.completed_weeks, overall.total_weeks));
    lines.push(format!("Theory read: {}/{}", overall.theory_read_count, overall.total_weeks));
    lines.push(format!(
        "Quizzes completed: {}/{}",
        overall.quizzes_completed_count, overall.total_weeks
    ));
    lines.push(format!("Average quiz score: {}%", overall.average_quiz_score));
    lines.push(String::new());

    if let Some(delta) = delta {
        let sign = if delta.delta > 0 { "+" } else { "" };
        lines.push("--- PLAN ANALYSIS ---".to_string());
        lines.push(format!("Status: {}", delta.status.as_str()));
        lines.push(format!("Difference: {}{}%", sign, delta.delta));
        lines.push(delta.message.clone());
        lines.push(String::new());
    }

    lines.push("--- WEEKLY PROGRESS ---".to_string());
    for week in &overall.per_week {
        lines.push(format!(
            "{} Week {}: {} - {}%",
            status_glyph(week.progress),
            week.week_number,
            week.topic,
            week.progress
        ));
    }

    lines.push(String::new());
    lines.push(String::new());
    lines.push(format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC")));

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use examplan_core::{ProgressStore, WeekId, WeekProgress};
    use examplan_progress::{overall_progress, progress_delta};

    fn generated_at() -> Time {
        Utc.with_ymd_and_hms(2026, 4, 7, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_minimal_report() {
        let overall = overall_progress(&ProgressStore::new());
        let report = text_report(None, &overall, None, None, generated_at());

        assert!(report.starts_with("=== PROGRESS REPORT - EXAMPLAN ===\n\n--- OVERALL ---\n"));
        assert!(!report.contains("Name:"));
        assert!(!report.contains("--- TIME ---"));
        assert!(!report.contains("--- PLAN ANALYSIS ---"));
        assert!(report.contains("○ Week 1: Real Numbers and Sets - 0%\n"));
        assert!(report.ends_with("\n\n\nGenerated: 2026-04-07 12:30:00 UTC\n"));
    }

    #[test]
    fn test_full_report() {
        let config: UserConfig = serde_json::from_str(
            r#"{"name":"Anna","examYear":2026,"examDate":"2026-05-12","level":"pr",
                "configComplete":true,"createdAt":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        let mut store = ProgressStore::new();
        store.insert(
            WeekId::new(1).unwrap(),
            WeekProgress {
                theory_read: true,
                quiz_score: Some(100.0),
                ..Default::default()
            },
        );
        store.insert(
            WeekId::new(2).unwrap(),
            WeekProgress {
                theory_read: true,
                quiz_score: Some(50.0),
                ..Default::default()
            },
        );
        let overall = overall_progress(&store);
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let time = examplan_progress::TimeStats::for_exam(config.exam_date, today);
        let delta = progress_delta(overall.average_progress, 2);

        let report = text_report(Some(&config), &overall, Some(&time), Some(&delta), generated_at());

        assert!(report.contains("Name: Anna\nLevel: PR\nExam date: 2026-05-12\n"));
        assert!(report.contains("Current week: 2/10\n"));
        assert!(report.contains("Difference: +14%\n"));
        assert!(report.contains("Status: ahead\n"));
        assert!(report.contains("✓ Week 1: Real Numbers and Sets - 100%\n"));
        assert!(report.contains("◐ Week 2:"));
        assert!(report.contains("○ Week 3:"));
    }

    #[test]
    fn test_negative_delta_has_no_plus() {
        let overall = overall_progress(&ProgressStore::new());
        let delta = progress_delta(0, 30);
        let report = text_report(None, &overall, None, Some(&delta), generated_at());
        assert!(report.contains("Difference: -30%\n"));

        let even = progress_delta(0, 0);
        let report = text_report(None, &overall, None, Some(&even), generated_at());
        assert!(report.contains("Difference: 0%\nYou are on the right track!\n\n--- WEEKLY PROGRESS ---\n"));
    }
}
