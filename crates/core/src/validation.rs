//! Validation of configuration form input and user-entered values.
//!
//! Validators never panic and never abort a computation; they report
//! problems as [`ValidationError`] values, collected per form field by
//! [`validate_config_input`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::config::{ExamLevel, UserConfigInput};
use crate::constants::{
    MAX_NAME_LENGTH, MAX_YEAR_OFFSET, MIN_NAME_LENGTH, MIN_YEAR_OFFSET, WEEKS_TOTAL,
};

/// Letters (including Polish diacritics), whitespace and hyphens.
const NAME_PATTERN: &str = r"^[a-zA-ZąćęłńóśźżĄĆĘŁŃÓŚŹŻ\s-]+$";

const TAG_PATTERN: &str = r"<[^>]*>";

static NAME_RE: OnceLock<Option<Regex>> = OnceLock::new();
static TAG_RE: OnceLock<Option<Regex>> = OnceLock::new();

/// A single rejected value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Empty name
    #[error("Name is required.")]
    NameRequired,

    /// Name under the minimum length
    #[error("Name must be at least {min} characters long.")]
    NameTooShort {
        /// Minimum length
        min: usize,
    },

    /// Name over the maximum length
    #[error("Name cannot be longer than {max} characters.")]
    NameTooLong {
        /// Maximum length
        max: usize,
    },

    /// Name with disallowed characters
    #[error("Name may only contain letters, spaces and hyphens.")]
    NameCharset,

    /// Year is not an integer
    #[error("Exam year must be a number.")]
    YearNotNumber,

    /// Year outside the accepted window
    #[error("Exam year must be between {min} and {max}.")]
    YearOutOfRange {
        /// Earliest year
        min: i32,
        /// Latest year
        max: i32,
    },

    /// Year the calendar cannot represent
    #[error("Exam year is outside the supported calendar range.")]
    YearUnsupported,

    /// Missing or unknown level
    #[error("Choose an exam level (basic or extended).")]
    LevelRequired,

    /// Unparseable date
    #[error("Invalid date.")]
    DateInvalid,

    /// Date before today
    #[error("Exam date cannot be in the past.")]
    DateInPast,

    /// Score is not a number
    #[error("Score must be a number.")]
    ScoreNotNumber,

    /// Score outside 0..=100
    #[error("Score must be between 0 and 100.")]
    ScoreOutOfRange,

    /// Week is not an integer
    #[error("Week number must be a number.")]
    WeekNotNumber,

    /// Week outside the plan
    #[error("Week number must be between 1 and {max}.")]
    WeekOutOfRange {
        /// Last week
        max: u32,
    },
}

/// Form field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Display name
    Name,
    /// Exam year
    ExamYear,
    /// Exam level
    Level,
    /// Exam date
    ExamDate,
}

impl Field {
    /// Field name as used by the configuration form.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::ExamYear => "examYear",
            Field::Level => "level",
            Field::ExamDate => "examDate",
        }
    }
}

/// Field-level validation errors of one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, ValidationError>,
}

impl ValidationErrors {
    /// Record an error for a field, replacing an earlier one.
    pub fn insert(&mut self, field: Field, error: ValidationError) {
        self.errors.insert(field, error);
    }

    /// Error recorded for a field.
    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    /// Whether a field has an error.
    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// True when the submission is valid.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of invalid fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field.as_str(), error)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a user name. Length is measured on the trimmed name, in characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::NameRequired);
    }

    let length = trimmed.chars().count();
    if length < MIN_NAME_LENGTH {
        return Err(ValidationError::NameTooShort { min: MIN_NAME_LENGTH });
    }
    if length > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong { max: MAX_NAME_LENGTH });
    }

    let matches = NAME_RE
        .get_or_init(|| Regex::new(NAME_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(trimmed));
    if !matches {
        return Err(ValidationError::NameCharset);
    }

    Ok(())
}

/// Validate an exam year against the window `current_year ..= current_year + 2`.
pub fn validate_exam_year(year: &str, current_year: i32) -> Result<i32, ValidationError> {
    let year = year
        .trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::YearNotNumber)?;

    let min = current_year + MIN_YEAR_OFFSET;
    let max = current_year + MAX_YEAR_OFFSET;
    if year < min || year > max {
        return Err(ValidationError::YearOutOfRange { min, max });
    }

    Ok(year)
}

/// Validate a level code or name.
pub fn validate_level(level: &str) -> Result<ExamLevel, ValidationError> {
    level.parse().map_err(|_| ValidationError::LevelRequired)
}

/// Validate an ISO exam date; it must not lie before `today`.
pub fn validate_exam_date(date: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::DateInvalid)?;
    if date < today {
        return Err(ValidationError::DateInPast);
    }
    Ok(date)
}

/// Validate a quiz score percentage.
pub fn validate_quiz_score(score: &str) -> Result<f64, ValidationError> {
    let score = score
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|s| !s.is_nan())
        .ok_or(ValidationError::ScoreNotNumber)?;
    if !(0.0..=100.0).contains(&score) {
        return Err(ValidationError::ScoreOutOfRange);
    }
    Ok(score)
}

/// Validate a week number of the plan.
pub fn validate_week_number(week: &str) -> Result<u32, ValidationError> {
    let week = week
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::WeekNotNumber)?;
    if week < 1 || week > i64::from(WEEKS_TOTAL) {
        return Err(ValidationError::WeekOutOfRange { max: WEEKS_TOTAL });
    }
    Ok(week as u32)
}

/// Validate the whole configuration form, collecting one error per field.
pub fn validate_config_input(input: &UserConfigInput, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if let Err(e) = validate_name(&input.name) {
        errors.insert(Field::Name, e);
    }
    if let Err(e) = validate_exam_year(&input.exam_year, today.year()) {
        errors.insert(Field::ExamYear, e);
    }
    if let Err(e) = validate_level(&input.level) {
        errors.insert(Field::Level, e);
    }

    errors
}

/// Trim input and strip anything that looks like an HTML tag.
pub fn sanitize_input(input: &str) -> String {
    let trimmed = input.trim();
    match TAG_RE.get_or_init(|| Regex::new(TAG_PATTERN).ok()) {
        Some(re) => re.replace_all(trimmed, "").into_owned(),
        None => trimmed.to_string(),
    }
}
