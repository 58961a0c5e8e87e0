//! New Relic CSV export ingest.
//!
//! The export is a four-column CSV: two identifying columns we ignore, a
//! bucket index, and an integer value. The bucket index times the export's
//! bucket width is the epoch second of the bucket; values land on the same
//! epoch-millisecond scale the metric store uses so the two sources can be
//! aligned. Fields in these exports are never quoted, so records split
//! directly on the delimiter.

use std::io::BufRead;

use tracing::debug;

use crate::error::{AnalyzeError, Result};

/// Number of fields in one export record.
const EXPORT_FIELDS: usize = 4;

/// Parses a New Relic CSV export into `(epoch_millis, value)` pairs,
/// sorted by timestamp.
///
/// The first line is a header and is skipped. `bucket_seconds` is the
/// export's bucket width (60 for per-minute exports, 900 for
/// fifteen-minute ones).
///
/// # Errors
///
/// Returns `AnalyzeError::InvalidRecord` on a record with the wrong field
/// count or non-numeric bucket/value fields, and `AnalyzeError::Io` if
/// reading fails.
pub fn parse_export(reader: impl BufRead, bucket_seconds: i64) -> Result<Vec<(i64, f64)>> {
    let mut pairs = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if index == 0 {
            // Header row
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != EXPORT_FIELDS {
            return Err(AnalyzeError::InvalidRecord {
                line: index + 1,
                reason: format!("expected {EXPORT_FIELDS} fields, got {}", fields.len()),
            });
        }

        let bucket: i64 = fields[2].trim().parse().map_err(|_| {
            AnalyzeError::InvalidRecord {
                line: index + 1,
                reason: format!("bucket index {:?} is not an integer", fields[2]),
            }
        })?;
        let value: f64 = fields[3].trim().parse().map_err(|_| {
            AnalyzeError::InvalidRecord {
                line: index + 1,
                reason: format!("value {:?} is not a number", fields[3]),
            }
        })?;

        pairs.push((bucket * bucket_seconds * 1000, value));
    }

    pairs.sort_by_key(|(timestamp, _)| *timestamp);
    debug!(points = pairs.len(), bucket_seconds, "parsed export");
    Ok(pairs)
}
