//! Error types for the promframe-client crate.

use thiserror::Error;

use promframe_metrics::MetricsError;

/// Errors that can occur while issuing a range query.
///
/// Transport failures live here, in the collaborator's error domain; they
/// are the only kind a caller might reasonably retry. Malformed bodies and
/// non-success statuses surface as [`MetricsError`] values and are not
/// retryable.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The Prometheus base URL could not be parsed or has the wrong scheme.
    #[error("invalid prometheus url: {reason}")]
    InvalidUrl {
        /// The reason the URL is invalid.
        reason: String,
    },

    /// The query window is invalid (start after end, or a zero step).
    #[error("invalid query window: {reason}")]
    InvalidWindow {
        /// The reason the window is invalid.
        reason: String,
    },

    /// The HTTP request itself failed (connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success HTTP status.
    #[error("unexpected http status {status} from {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The request URL.
        url: String,
    },

    /// The response body failed to decode or validate.
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
