//! Exam date and study schedule arithmetic.
//!
//! Every function takes calendar dates, so time of day never skews a
//! comparison. Callers convert timestamps with `date_naive()` first.

use chrono::{Datelike, Days, NaiveDate};

use crate::constants::{DAYS_PER_WEEK, EXAM_MONTH, EXAM_WEEK_NUMBER, TOTAL_STUDY_DAYS, WEEKS_TOTAL};

/// Week index returned once the exam day has been reached.
pub const EXAM_PASSED_WEEK: u32 = WEEKS_TOTAL + 1;

/// Exam date of the given year: the second Tuesday of May.
///
/// Returns `None` only for years chrono cannot represent.
pub fn exam_date(year: i32) -> Option<NaiveDate> {
    let may_first = NaiveDate::from_ymd_opt(year, EXAM_MONTH, 1)?;

    let first_tuesday = match may_first.weekday().num_days_from_sunday() {
        0 => 3,
        1 => 2,
        2 => 1,
        weekday => 1 + (7 - weekday) + 2,
    };
    let day = first_tuesday + DAYS_PER_WEEK * (EXAM_WEEK_NUMBER - 1);

    NaiveDate::from_ymd_opt(year, EXAM_MONTH, day)
}

/// First day of the study plan, `TOTAL_STUDY_DAYS` before the exam.
pub fn study_start(exam_date: NaiveDate) -> NaiveDate {
    exam_date
        .checked_sub_days(Days::new(u64::from(TOTAL_STUDY_DAYS)))
        .unwrap_or(NaiveDate::MIN)
}

/// Signed number of days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Days elapsed since the study plan started (negative before the start).
fn days_since_start(exam_date: NaiveDate, today: NaiveDate) -> i64 {
    i64::from(TOTAL_STUDY_DAYS) - days_between(today, exam_date)
}

/// Current week of the plan.
///
/// `0` before the plan starts, [`EXAM_PASSED_WEEK`] on or after the exam
/// day, otherwise the 1-based week containing `today`.
pub fn current_week_index(exam_date: NaiveDate, today: NaiveDate) -> u32 {
    let elapsed = days_since_start(exam_date, today);

    if elapsed < 0 {
        0
    } else if today >= exam_date {
        EXAM_PASSED_WEEK
    } else {
        let week = elapsed / i64::from(DAYS_PER_WEEK) + 1;
        week.min(i64::from(WEEKS_TOTAL)) as u32
    }
}

/// Progress percentage the user should have reached by `today` on a linear
/// ramp from the plan start (0) to the exam day (100).
pub fn expected_progress_percent(exam_date: NaiveDate, today: NaiveDate) -> u8 {
    let elapsed = days_since_start(exam_date, today);

    if elapsed < 0 {
        0
    } else if today >= exam_date {
        100
    } else {
        let percent = (100.0 * elapsed as f64 / f64::from(TOTAL_STUDY_DAYS)).round();
        percent.min(100.0) as u8
    }
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_exam_date_2026() {
        // May 1, 2026 is a Friday
        assert_eq!(exam_date(2026), Some(date(2026, 5, 12)));
    }

    #[test]
    fn test_exam_date_is_second_tuesday_of_may() {
        for year in 1990..2100 {
            let exam = exam_date(year).unwrap();
            assert_eq!(exam.month(), 5);
            assert_eq!(exam.weekday(), Weekday::Tue);
            assert!((8..=14).contains(&exam.day()), "{year}: {exam}");
        }
    }

    #[test]
    fn test_exam_date_each_may_first_weekday() {
        assert_eq!(exam_date(2022), Some(date(2022, 5, 10))); // Sunday
        assert_eq!(exam_date(2023), Some(date(2023, 5, 9))); // Monday
        assert_eq!(exam_date(2029), Some(date(2029, 5, 8))); // Tuesday
        assert_eq!(exam_date(2024), Some(date(2024, 5, 14))); // Wednesday
        assert_eq!(exam_date(2025), Some(date(2025, 5, 13))); // Thursday
        assert_eq!(exam_date(2027), Some(date(2027, 5, 11))); // Saturday
    }

    #[test]
    fn test_study_start() {
        assert_eq!(study_start(date(2026, 5, 12)), date(2026, 3, 3));
    }

    #[test]
    fn test_current_week_boundaries() {
        let exam = date(2026, 5, 12);
        assert_eq!(current_week_index(exam, date(2026, 3, 2)), 0);
        assert_eq!(current_week_index(exam, date(2025, 12, 1)), 0);
        assert_eq!(current_week_index(exam, date(2026, 3, 3)), 1);
        assert_eq!(current_week_index(exam, date(2026, 3, 9)), 1);
        assert_eq!(current_week_index(exam, date(2026, 3, 10)), 2);
        assert_eq!(current_week_index(exam, date(2026, 5, 11)), 10);
        assert_eq!(current_week_index(exam, date(2026, 5, 12)), EXAM_PASSED_WEEK);
        assert_eq!(current_week_index(exam, date(2027, 1, 1)), EXAM_PASSED_WEEK);
    }

    #[test]
    fn test_expected_progress_ramp() {
        let exam = date(2026, 5, 12);
        assert_eq!(expected_progress_percent(exam, date(2026, 3, 1)), 0);
        assert_eq!(expected_progress_percent(exam, date(2026, 3, 3)), 0);
        // 35 of 70 days
        assert_eq!(expected_progress_percent(exam, date(2026, 4, 7)), 50);
        // 1 of 70 days rounds to 1
        assert_eq!(expected_progress_percent(exam, date(2026, 3, 4)), 1);
        assert_eq!(expected_progress_percent(exam, date(2026, 5, 12)), 100);
        assert_eq!(expected_progress_percent(exam, date(2026, 6, 1)), 100);
    }

    #[test]
    fn test_days_between_and_format() {
        assert_eq!(days_between(date(2026, 5, 1), date(2026, 5, 12)), 11);
        assert_eq!(days_between(date(2026, 5, 12), date(2026, 5, 1)), -11);
        assert_eq!(format_iso(date(2026, 3, 3)), "2026-03-03");
    }
}
