//! Labeled time-series store for Prometheus range-query responses.
//!
//! `promframe-metrics` parses the JSON body of a range query into an
//! immutable, label-keyed collection of series, then supports the two
//! transformations the analysis workflow needs:
//!
//! - **Selection/projection**: fix one label's value and drop that label,
//!   producing a new store one dimension smaller.
//! - **Frame assembly**: merge every series onto one sorted, gap-filled
//!   timestamp axis for hand-off to plotting or correlation consumers.
//!
//! Everything is synchronous and in-memory; fetching the response body is
//! the job of an HTTP collaborator (see `promframe-client`).
//!
//! # Example
//!
//! ```rust
//! use promframe_metrics::MetricStore;
//!
//! let body = r#"{
//!     "status": "success",
//!     "data": {
//!         "resultType": "matrix",
//!         "result": [
//!             {"metric": {"service": "a"}, "values": [[1.0, "10"], [2.0, "20"]]},
//!             {"metric": {"service": "b"}, "values": [[2.0, "5"], [3.0, "6"]]}
//!         ]
//!     }
//! }"#;
//!
//! let store = MetricStore::from_json_str(body).unwrap();
//! assert_eq!(store.label_keys(), &["service"]);
//!
//! let frame = store.frame(0.0).unwrap();
//! assert_eq!(frame.timestamps(), &[1000, 2000, 3000]);
//! assert_eq!(frame.column("a").unwrap().values, vec![10.0, 20.0, 0.0]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod frame;
pub mod response;
pub mod store;
pub mod types;

// Re-export main types at crate root
pub use error::{MetricsError, Result};
pub use frame::{Column, Frame, DEFAULT_COLUMN_SEPARATOR};
pub use response::{RangeData, RangeResponse, RangeSeries, SampleValue, STATUS_SUCCESS};
pub use store::MetricStore;
pub use types::{millis_from_wire_seconds, LabelSet, Series};
