//! Error types for the promframe-metrics crate.

use thiserror::Error;

/// Errors that can occur while reading or transforming metric series.
///
/// All of these signal a malformed input or a misuse of the API. None are
/// retryable: a malformed response stays malformed, and transient upstream
/// failures belong to the HTTP collaborator's error domain.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The response status field was not the success marker.
    #[error("invalid response status: {status}{}", .detail.as_deref().map_or_else(String::new, |d| format!(" ({d})")))]
    InvalidResponse {
        /// The status value the response carried.
        status: String,
        /// Upstream error detail, when the response included one.
        detail: Option<String>,
    },

    /// The result entries did not all share an identical set of label keys.
    #[error("inconsistent label schema: {reason}")]
    InconsistentSchema {
        /// The reason the schema check failed.
        reason: String,
    },

    /// Selection was attempted on a label key the store does not have.
    #[error("unknown label key: {key}")]
    UnknownLabelKey {
        /// The key that was requested.
        key: String,
    },

    /// Two series reduced to the same column name during frame assembly.
    #[error("duplicate column name: {name:?}")]
    DuplicateColumnName {
        /// The colliding column name.
        name: String,
    },

    /// Two result entries carried identical label sets.
    #[error("duplicate series for labels {labels}")]
    DuplicateSeries {
        /// The colliding label set, rendered for display.
        labels: String,
    },

    /// A sample could not be decoded into a (timestamp, value) pair.
    #[error("invalid sample: {reason}")]
    InvalidSample {
        /// The reason the sample is invalid.
        reason: String,
    },

    /// The response body was not valid JSON in the expected shape.
    #[error("malformed response body: {reason}")]
    MalformedBody {
        /// The decode failure description.
        reason: String,
    },
}

/// Result type for metric-series operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_invalid_response() {
        let err = MetricsError::InvalidResponse {
            status: "error".to_string(),
            detail: None,
        };
        assert_eq!(err.to_string(), "invalid response status: error");
    }

    #[test]
    fn error_display_invalid_response_with_detail() {
        let err = MetricsError::InvalidResponse {
            status: "error".to_string(),
            detail: Some("query parse error".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "invalid response status: error (query parse error)"
        );
    }

    #[test]
    fn error_display_inconsistent_schema() {
        let err = MetricsError::InconsistentSchema {
            reason: "found 2 label key sets".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "inconsistent label schema: found 2 label key sets"
        );
    }

    #[test]
    fn error_display_unknown_label_key() {
        let err = MetricsError::UnknownLabelKey {
            key: "namespace".to_string(),
        };
        assert_eq!(err.to_string(), "unknown label key: namespace");
    }

    #[test]
    fn error_display_duplicate_column_name() {
        let err = MetricsError::DuplicateColumnName {
            name: "auth-server".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate column name: \"auth-server\"");
    }
}
