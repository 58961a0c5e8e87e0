//! Correlation and cross-source alignment over promframe frames.
//!
//! `promframe-analyze` is the statistics consumer of the metric store's
//! frame output: Pearson correlation across frame columns with ranked pair
//! reporting, plus ingest of New Relic CSV exports and bucket alignment so
//! scraped metrics can be compared against an external reference stream.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod align;
pub mod correlate;
pub mod error;
pub mod new_relic;

// Re-export main types at crate root
pub use align::{align_buckets, delta_align_buckets, AlignedRow};
pub use correlate::{pearson, CorrelationMatrix, CorrelationPair};
pub use error::{AnalyzeError, Result};
pub use new_relic::parse_export;
