//! Prometheus range-query client and PromQL catalog.
//!
//! `promframe-client` is the HTTP collaborator for `promframe-metrics`: it
//! issues `query_range` calls and hands the body to the core for decoding.
//! The query catalog holds the PromQL templates the analysis workflows use
//! (ingress request rates, CPU utilization and seconds, memory usage) as
//! pure parameter-substitution functions.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod error;
pub mod queries;
pub mod window;

// Re-export main types at crate root
pub use client::PrometheusClient;
pub use error::{ClientError, Result};
pub use window::{QueryWindow, DEFAULT_STEP_SECONDS};
