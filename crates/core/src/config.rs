//! User configuration model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schedule;
use crate::validation::{self, Field, ValidationError, ValidationErrors};
use crate::Time;

/// Exam level the user prepares for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExamLevel {
    /// Basic level
    #[default]
    #[serde(rename = "pp")]
    Basic,
    /// Extended level
    #[serde(rename = "pr")]
    Extended,
}

impl ExamLevel {
    /// Short code used in storage and titles.
    pub fn code(self) -> &'static str {
        match self {
            ExamLevel::Basic => "pp",
            ExamLevel::Extended => "pr",
        }
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            ExamLevel::Basic => "Basic",
            ExamLevel::Extended => "Extended",
        }
    }
}

impl std::fmt::Display for ExamLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for ExamLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pp" | "basic" => Ok(ExamLevel::Basic),
            "pr" | "extended" => Ok(ExamLevel::Extended),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

/// Level string that is neither basic nor extended.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown exam level: {0:?}")]
pub struct UnknownLevel(pub String);

/// Completed user configuration.
///
/// Created once by the configuration flow and only ever replaced as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Display name
    pub name: String,

    /// Year of the exam
    #[serde(alias = "maturaYear")]
    pub exam_year: i32,

    /// Exam day, derived from the year
    #[serde(alias = "maturaDate")]
    pub exam_date: NaiveDate,

    /// Exam level
    pub level: ExamLevel,

    /// Whether the configuration flow finished
    #[serde(default)]
    pub config_complete: bool,

    /// When the configuration was created
    pub created_at: Time,
}

/// Raw answers from the configuration form, before validation.
#[derive(Debug, Clone, Default)]
pub struct UserConfigInput {
    /// Name as typed
    pub name: String,
    /// Exam year as typed
    pub exam_year: String,
    /// Level code or name as selected
    pub level: String,
}

impl UserConfig {
    /// Validate form input and build a complete configuration.
    ///
    /// `today` bounds the accepted exam years, `now` becomes `created_at`.
    pub fn create(
        input: &UserConfigInput,
        today: NaiveDate,
        now: Time,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = validation::validate_config_input(input, today);

        let name = validation::sanitize_input(&input.name);
        let exam_year = input.exam_year.trim().parse::<i32>().ok();
        let level = input.level.parse::<ExamLevel>().ok();
        let exam_date = exam_year.and_then(schedule::exam_date);

        if exam_year.is_some() && exam_date.is_none() && !errors.contains(Field::ExamYear) {
            errors.insert(Field::ExamYear, ValidationError::YearUnsupported);
        }

        match (exam_year, exam_date, level) {
            (Some(exam_year), Some(exam_date), Some(level)) if errors.is_empty() => Ok(Self {
                name,
                exam_year,
                exam_date,
                level,
                config_complete: true,
                created_at: now,
            }),
            _ => Err(errors),
        }
    }
}
