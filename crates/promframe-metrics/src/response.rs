//! Wire types for the Prometheus range-query response.
//!
//! The shape mirrors `GET /api/v1/query_range` exactly: a `status` field and
//! `data.result` entries, each carrying a `metric` label mapping and a list
//! of `[timestamp, value]` pairs with the timestamp first. Values usually
//! arrive as stringified numbers and are coerced at read time.
//!
//! Fetching the response is the HTTP collaborator's job; this module only
//! decodes a body it is handed.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;

use crate::error::{MetricsError, Result};

/// The status value Prometheus uses for a successful query.
pub const STATUS_SUCCESS: &str = "success";

/// A decoded range-query response body.
#[derive(Debug, Clone, Deserialize)]
pub struct RangeResponse {
    /// Response status; `"success"` or `"error"`.
    pub status: String,
    /// Result payload, present on success.
    #[serde(default)]
    pub data: Option<RangeData>,
    /// Upstream error message, present on failure.
    #[serde(default)]
    pub error: Option<String>,
    /// Upstream error classification, present on failure.
    #[serde(default, rename = "errorType")]
    pub error_type: Option<String>,
}

/// The `data` section of a range-query response.
#[derive(Debug, Clone, Deserialize)]
pub struct RangeData {
    /// Result type reported by the server (`"matrix"` for range queries).
    #[serde(default, rename = "resultType")]
    pub result_type: Option<String>,
    /// One entry per matched series.
    #[serde(default)]
    pub result: Vec<RangeSeries>,
}

/// One series entry in a range-query result.
#[derive(Debug, Clone, Deserialize)]
pub struct RangeSeries {
    /// The label mapping identifying this series.
    pub metric: HashMap<String, String>,
    /// `[timestamp, value]` pairs; timestamp in float epoch seconds.
    #[serde(default)]
    pub values: Vec<(f64, SampleValue)>,
}

/// A sample value as it appears on the wire.
///
/// Prometheus stringifies values (`"0.25"`, `"NaN"`, `"+Inf"`), but the
/// decoder also tolerates a bare JSON number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SampleValue {
    /// The usual stringified form.
    Text(String),
    /// A bare number.
    Number(f64),
}

impl SampleValue {
    /// Coerces the wire value to a float.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::InvalidSample` if a text value does not parse
    /// as a float.
    pub fn parse(&self) -> Result<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                MetricsError::InvalidSample {
                    reason: format!("value {s:?} is not a number"),
                }
            }),
        }
    }
}

impl RangeResponse {
    /// Decodes a response from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::MalformedBody` if the body is not JSON in the
    /// expected shape.
    pub fn from_json_str(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| MetricsError::MalformedBody {
            reason: e.to_string(),
        })
    }

    /// Decodes a response from a reader (e.g. a snapshot file).
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::MalformedBody` if the body is not JSON in the
    /// expected shape.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|e| MetricsError::MalformedBody {
            reason: e.to_string(),
        })
    }

    /// Returns `true` if the status field is the success marker.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Checks the status field, surfacing upstream error detail on failure.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::InvalidResponse` if the status is not
    /// [`STATUS_SUCCESS`].
    pub fn ensure_success(&self) -> Result<()> {
        if self.is_success() {
            return Ok(());
        }
        let detail = match (&self.error_type, &self.error) {
            (Some(kind), Some(msg)) => Some(format!("{kind}: {msg}")),
            (None, Some(msg)) => Some(msg.clone()),
            (Some(kind), None) => Some(kind.clone()),
            (None, None) => None,
        };
        Err(MetricsError::InvalidResponse {
            status: self.status.clone(),
            detail,
        })
    }
}
