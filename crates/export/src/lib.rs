//! Report and export formatting for examplan.
//!
//! Every renderer here returns a string; writing it somewhere is up to the
//! caller.

#![warn(missing_docs)]

pub mod error;
pub mod report;
pub mod csv;
pub mod snapshot;
pub mod certificate;

pub use error::{ExportError, Result};
pub use report::text_report;
pub use csv::{weeks_to_csv, CSV_HEADER};
pub use snapshot::StatisticsSnapshot;
pub use certificate::render_certificate;

pub use examplan_storage::Backup;
