//! Bucket alignment of two observation streams.
//!
//! Prometheus samples and external exports rarely land on the same
//! instants. Alignment floors both streams' timestamps to a common bucket
//! width and joins them on the bucket, so a measured stream can be compared
//! against a reference stream point by point (e.g. scraped CPU against
//! billed request counts).

use std::collections::BTreeMap;

/// One aligned bucket of measured and reference observations.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow {
    /// Bucket start, epoch milliseconds.
    pub timestamp: i64,
    /// The measured stream's value in this bucket; 0 when absent.
    pub measured: f64,
    /// The reference stream's value in this bucket; 0 when absent.
    pub reference: f64,
    /// `measured / reference`, or 0 when the reference is 0.
    pub ratio: f64,
}

/// Joins two `(epoch_millis, value)` streams on buckets of
/// `bucket_seconds`, sorted by bucket.
///
/// When a stream has several observations in one bucket, the last one in
/// input order wins.
#[must_use]
pub fn align_buckets(
    measured: &[(i64, f64)],
    reference: &[(i64, f64)],
    bucket_seconds: i64,
) -> Vec<AlignedRow> {
    let bucket_millis = bucket_seconds.max(1) * 1000;
    let floor = |timestamp: i64| (timestamp.div_euclid(bucket_millis)) * bucket_millis;

    let mut buckets: BTreeMap<i64, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for (timestamp, value) in measured {
        buckets.entry(floor(*timestamp)).or_default().0 = Some(*value);
    }
    for (timestamp, value) in reference {
        buckets.entry(floor(*timestamp)).or_default().1 = Some(*value);
    }

    buckets
        .into_iter()
        .map(|(timestamp, (measured, reference))| {
            let measured = measured.unwrap_or(0.0);
            let reference = reference.unwrap_or(0.0);
            let ratio = if reference == 0.0 {
                0.0
            } else {
                measured / reference
            };
            AlignedRow {
                timestamp,
                measured,
                reference,
                ratio,
            }
        })
        .collect()
}

/// Joins a cumulative measured stream against a reference stream after
/// differencing it bucket to bucket.
///
/// The measured stream is bucketed first (last observation in a bucket
/// wins), then consecutive bucket values are differenced, so each row
/// carries the measured growth since the previous bucket. The first
/// measured bucket has no predecessor and is dropped. A counter reset
/// surfaces as a negative delta and is passed through.
#[must_use]
pub fn delta_align_buckets(
    measured: &[(i64, f64)],
    reference: &[(i64, f64)],
    bucket_seconds: i64,
) -> Vec<AlignedRow> {
    let bucket_millis = bucket_seconds.max(1) * 1000;
    let floor = |timestamp: i64| (timestamp.div_euclid(bucket_millis)) * bucket_millis;

    let mut cumulative: BTreeMap<i64, f64> = BTreeMap::new();
    for (timestamp, value) in measured {
        cumulative.insert(floor(*timestamp), *value);
    }

    let mut deltas = Vec::with_capacity(cumulative.len().saturating_sub(1));
    let mut previous = None;
    for (timestamp, value) in cumulative {
        if let Some(prev) = previous {
            deltas.push((timestamp, value - prev));
        }
        previous = Some(value);
    }

    align_buckets(&deltas, reference, bucket_seconds)
}
