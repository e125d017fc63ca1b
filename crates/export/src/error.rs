//! Export errors.

/// Errors raised while producing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// No user configuration is stored
    #[error("no user configuration, run `init` first")]
    NotConfigured,

    /// The plan is not finished yet
    #[error("certificate available after completing 100% of the plan (currently {progress}%)")]
    Incomplete {
        /// Current overall progress
        progress: u8,
    },

    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
