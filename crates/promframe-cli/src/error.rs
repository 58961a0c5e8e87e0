//! CLI error types.

use thiserror::Error;

use promframe_analyze::AnalyzeError;
use promframe_client::ClientError;
use promframe_metrics::MetricsError;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// An argument combination the parser cannot catch (e.g. a per-namespace
    /// preset without a namespace).
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// The reason the arguments are invalid.
        reason: String,
    },

    /// Core store error.
    #[error(transparent)]
    Metrics(#[from] MetricsError),

    /// Query client error.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Analysis error.
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
