//! Error types for the promframe-analyze crate.

use thiserror::Error;

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// A New Relic export record did not have the expected shape.
    #[error("invalid export record at line {line}: {reason}")]
    InvalidRecord {
        /// One-based line number in the export.
        line: usize,
        /// The reason the record is invalid.
        reason: String,
    },

    /// Reading the export failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalyzeError>;
