//! The keyed collection of series produced by one range query.
//!
//! A [`MetricStore`] maps canonical [`LabelSet`]s to their [`Series`] and
//! carries the set of label keys common to every entry. Stores are immutable
//! after construction; [`MetricStore::select`] returns a new, reduced store
//! rather than mutating the source.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::{MetricsError, Result};
use crate::frame::{Frame, DEFAULT_COLUMN_SEPARATOR};
use crate::response::RangeResponse;
use crate::types::{millis_from_wire_seconds, LabelSet, Series};

/// An immutable collection of labeled series, keyed by label set.
///
/// Invariants, enforced at construction:
/// - every series uses exactly the same set of label keys;
/// - no two series share an identical label set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricStore {
    /// Label keys common to every series, sorted lexicographically.
    label_keys: Vec<String>,
    /// The series, keyed by canonical label set.
    series: BTreeMap<LabelSet, Series>,
}

impl MetricStore {
    /// Builds a store from a decoded range-query response.
    ///
    /// Timestamps are converted from wire float seconds to epoch
    /// milliseconds; values are coerced to floats.
    ///
    /// # Errors
    ///
    /// - `MetricsError::InvalidResponse` if the status is not the success
    ///   marker.
    /// - `MetricsError::InconsistentSchema` unless grouping the result
    ///   entries by label-key set yields exactly one group. A response with
    ///   zero entries fails this check too.
    /// - `MetricsError::DuplicateSeries` if two entries carry identical
    ///   label sets.
    /// - `MetricsError::InvalidSample` if a value cannot be coerced.
    pub fn from_response(response: &RangeResponse) -> Result<Self> {
        response.ensure_success()?;

        let entries = response
            .data
            .as_ref()
            .map(|d| d.result.as_slice())
            .unwrap_or_default();

        // Group entries by their label-key set; exactly one group may exist.
        let mut key_sets: BTreeSet<Vec<&str>> = BTreeSet::new();
        for entry in entries {
            let mut keys: Vec<&str> = entry.metric.keys().map(String::as_str).collect();
            keys.sort_unstable();
            key_sets.insert(keys);
        }
        if key_sets.len() != 1 {
            return Err(MetricsError::InconsistentSchema {
                reason: format!(
                    "expected exactly one label key set, found {}: {key_sets:?}",
                    key_sets.len()
                ),
            });
        }

        let mut series: BTreeMap<LabelSet, Series> = BTreeMap::new();
        for entry in entries {
            let labels = LabelSet::from_map(&entry.metric);
            let mut points = Series::empty();
            for (wire_ts, wire_value) in &entry.values {
                points.push(millis_from_wire_seconds(*wire_ts), wire_value.parse()?);
            }
            if series.insert(labels.clone(), points).is_some() {
                return Err(MetricsError::DuplicateSeries {
                    labels: labels.to_string(),
                });
            }
        }

        let label_keys: Vec<String> = key_sets
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();

        debug!(
            series = series.len(),
            label_keys = ?label_keys,
            "constructed metric store"
        );

        Ok(Self { label_keys, series })
    }

    /// Decodes a JSON response body and builds a store from it.
    ///
    /// # Errors
    ///
    /// As [`MetricStore::from_response`], plus `MetricsError::MalformedBody`
    /// on a body that is not JSON in the expected shape.
    pub fn from_json_str(body: &str) -> Result<Self> {
        Self::from_response(&RangeResponse::from_json_str(body)?)
    }

    /// Reads a JSON response body (e.g. a snapshot file) and builds a store.
    ///
    /// # Errors
    ///
    /// As [`MetricStore::from_json_str`].
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self> {
        Self::from_response(&RangeResponse::from_reader(reader)?)
    }

    /// Returns the label keys common to every series, sorted.
    #[must_use]
    pub fn label_keys(&self) -> &[String] {
        &self.label_keys
    }

    /// Returns the distinct values a label key takes across all series,
    /// sorted for stable output.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::UnknownLabelKey` if the store does not have
    /// the key.
    pub fn label_values(&self, key: &str) -> Result<Vec<String>> {
        self.ensure_key(key)?;
        let values: BTreeSet<&str> = self
            .series
            .keys()
            .filter_map(|labels| labels.get(key))
            .collect();
        Ok(values.into_iter().map(str::to_string).collect())
    }

    /// Filters to series whose label `key` equals `value` and projects the
    /// key out of the result, reducing dimensionality by one label.
    ///
    /// No match is not an error: the result is an empty store over the
    /// remaining keys, and callers must handle it.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::UnknownLabelKey` if the store does not have
    /// the key.
    pub fn select(&self, key: &str, value: &str) -> Result<Self> {
        self.ensure_key(key)?;

        let label_keys: Vec<String> = self
            .label_keys
            .iter()
            .filter(|k| k.as_str() != key)
            .cloned()
            .collect();

        let mut series = BTreeMap::new();
        for (labels, points) in &self.series {
            if labels.get(key) == Some(value) {
                series.insert(labels.without(key), points.clone());
            }
        }

        debug!(
            key,
            value,
            matched = series.len(),
            remaining_keys = ?label_keys,
            "selected series"
        );

        Ok(Self { label_keys, series })
    }

    /// Assembles the store onto a common sorted timestamp axis, filling
    /// gaps with `missing_value`. Column names join label values with
    /// [`DEFAULT_COLUMN_SEPARATOR`].
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::DuplicateColumnName` if two series reduce to
    /// the same column name.
    pub fn frame(&self, missing_value: f64) -> Result<Frame> {
        Frame::from_store(self, missing_value, DEFAULT_COLUMN_SEPARATOR)
    }

    /// As [`MetricStore::frame`], with an application-defined separator.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::DuplicateColumnName` on a column-name
    /// collision.
    pub fn frame_with_separator(&self, missing_value: f64, separator: &str) -> Result<Frame> {
        Frame::from_store(self, missing_value, separator)
    }

    /// Returns the series for an exact label set, if present.
    #[must_use]
    pub fn get(&self, labels: &LabelSet) -> Option<&Series> {
        self.series.get(labels)
    }

    /// Iterates over `(labels, series)` entries in label-set order.
    pub fn iter(&self) -> impl Iterator<Item = (&LabelSet, &Series)> {
        self.series.iter()
    }

    /// Returns the number of series in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns `true` if the store holds no series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    fn ensure_key(&self, key: &str) -> Result<()> {
        if self.label_keys.iter().any(|k| k == key) {
            Ok(())
        } else {
            Err(MetricsError::UnknownLabelKey {
                key: key.to_string(),
            })
        }
    }
}
