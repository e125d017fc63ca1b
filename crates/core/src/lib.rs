//! examplan core data models.
//!
//! This crate defines the user configuration, the per-week progress
//! records and the pure schedule arithmetic that the rest of the
//! planner builds on.

#![warn(missing_docs)]

// Plan parameters
pub mod constants;
mod id;

// Records
mod config;
mod progress;
pub mod quiz;

// Pure helpers
pub mod schedule;
pub mod validation;

// Re-exports
pub use constants::{topic_for_week, week_title, WEEKS_TOTAL, DAYS_PER_WEEK, TOTAL_STUDY_DAYS};
pub use id::{WeekId, InvalidWeek};

pub use config::{ExamLevel, UnknownLevel, UserConfig, UserConfigInput};
pub use progress::{ProgressStore, WeekProgress};
pub use quiz::{Question, QuestionKind, QuizOutcome, QuizSheet};

pub use validation::{Field, ValidationError, ValidationErrors};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
