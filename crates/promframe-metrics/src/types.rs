//! Core types for labeled time series.
//!
//! This module provides the two building blocks of the store:
//! - [`LabelSet`]: a canonically ordered set of label key/value pairs,
//!   usable as a lookup key
//! - [`Series`]: the (timestamp, value) observations for one labeled entity
//!
//! Timestamps are Unix epoch milliseconds throughout. The Prometheus wire
//! format carries float epoch seconds; [`millis_from_wire_seconds`] bridges
//! the two at ingest without losing sub-second instants.

use std::collections::HashMap;
use std::fmt;

use crate::error::{MetricsError, Result};

/// Converts a wire-format float epoch-seconds timestamp to epoch milliseconds.
#[must_use]
pub fn millis_from_wire_seconds(seconds: f64) -> i64 {
    (seconds * 1000.0).round() as i64
}

/// A canonical set of label key/value pairs identifying one series.
///
/// Labels are unordered in the source response, so they are canonicalized
/// here as a sequence of pairs sorted by key. That makes two label sets with
/// the same content compare and hash equal regardless of source ordering,
/// which is what lets a `LabelSet` serve as the store's lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelSet(Vec<(String, String)>);

impl LabelSet {
    /// Creates a canonical label set from an unordered mapping.
    ///
    /// Pairs are sorted by key. Keys are expected to be unique (they come
    /// from a JSON object); if a duplicate slips in, the first value wins.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut pairs: Vec<(String, String)> = pairs.into_iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs.dedup_by(|a, b| a.0 == b.0);
        Self(pairs)
    }

    /// Creates a label set from a decoded `metric` mapping.
    #[must_use]
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self::from_pairs(map.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    /// Returns the empty label set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns the value for a label key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|ix| self.0[ix].1.as_str())
    }

    /// Returns `true` if the label set contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over label keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over label values in key order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, v)| v.as_str())
    }

    /// Returns a copy of this label set with `key` removed.
    ///
    /// This is the projection half of [`MetricStore::select`]: fixing a
    /// label's value removes that dimension from the remaining series.
    ///
    /// [`MetricStore::select`]: crate::store::MetricStore::select
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(k, _)| k != key)
                .cloned()
                .collect(),
        )
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the label set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}={v:?}")?;
        }
        write!(f, "}}")
    }
}

/// The observations for one labeled entity.
///
/// Stored as parallel timestamp/value vectors in wire order, which is not
/// guaranteed sorted. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    timestamps: Vec<i64>,
    values: Vec<f64>,
}

impl Series {
    /// Creates a series from parallel timestamp and value vectors.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::InvalidSample` if the vectors differ in length.
    pub fn new(timestamps: Vec<i64>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(MetricsError::InvalidSample {
                reason: format!(
                    "{} timestamps but {} values",
                    timestamps.len(),
                    values.len()
                ),
            });
        }
        Ok(Self { timestamps, values })
    }

    /// Creates an empty series.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            timestamps: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Appends one observation.
    pub fn push(&mut self, timestamp: i64, value: f64) {
        self.timestamps.push(timestamp);
        self.values.push(value);
    }

    /// Returns the timestamps in wire order.
    #[must_use]
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Returns the values in wire order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over `(timestamp, value)` observations in wire order.
    pub fn points(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Returns `true` if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod label_set_tests {
        use super::*;

        #[test]
        fn from_pairs_sorts_by_key() {
            let labels = LabelSet::from_pairs([
                ("service".to_string(), "auth".to_string()),
                ("namespace".to_string(), "prod".to_string()),
            ]);

            let keys: Vec<&str> = labels.keys().collect();
            assert_eq!(keys, vec!["namespace", "service"]);
        }

        #[test]
        fn equal_regardless_of_source_order() {
            let a = LabelSet::from_pairs([
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "1".to_string()),
            ]);
            let b = LabelSet::from_pairs([
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ]);

            assert_eq!(a, b);
        }

        #[test]
        fn get_finds_value_by_key() {
            let labels = LabelSet::from_pairs([
                ("container_name".to_string(), "auth-server".to_string()),
                ("namespace".to_string(), "prod".to_string()),
            ]);

            assert_eq!(labels.get("container_name"), Some("auth-server"));
            assert_eq!(labels.get("namespace"), Some("prod"));
            assert_eq!(labels.get("pod"), None);
        }

        #[test]
        fn without_removes_exactly_one_key() {
            let labels = LabelSet::from_pairs([
                ("container_name".to_string(), "auth-server".to_string()),
                ("namespace".to_string(), "prod".to_string()),
            ]);

            let reduced = labels.without("namespace");
            assert_eq!(reduced.len(), 1);
            assert_eq!(reduced.get("container_name"), Some("auth-server"));
            assert!(!reduced.contains_key("namespace"));

            // Input is untouched
            assert_eq!(labels.len(), 2);
        }

        #[test]
        fn without_missing_key_is_identity() {
            let labels = LabelSet::from_pairs([("a".to_string(), "1".to_string())]);
            assert_eq!(labels.without("zzz"), labels);
        }

        #[test]
        fn empty_label_set() {
            let labels = LabelSet::empty();
            assert!(labels.is_empty());
            assert_eq!(labels.len(), 0);
            assert_eq!(labels.to_string(), "{}");
        }

        #[test]
        fn display_renders_sorted_pairs() {
            let labels = LabelSet::from_pairs([
                ("service".to_string(), "auth".to_string()),
                ("namespace".to_string(), "prod".to_string()),
            ]);
            assert_eq!(labels.to_string(), "{namespace=\"prod\", service=\"auth\"}");
        }

        #[test]
        fn label_sets_order_deterministically() {
            let a = LabelSet::from_pairs([("service".to_string(), "a".to_string())]);
            let b = LabelSet::from_pairs([("service".to_string(), "b".to_string())]);
            assert!(a < b);
        }
    }

    mod series_tests {
        use super::*;

        #[test]
        fn new_accepts_parallel_vectors() {
            let series = Series::new(vec![1000, 2000], vec![10.0, 20.0]).unwrap();
            assert_eq!(series.len(), 2);
            assert_eq!(series.timestamps(), &[1000, 2000]);
            assert_eq!(series.values(), &[10.0, 20.0]);
        }

        #[test]
        fn new_rejects_length_mismatch() {
            let result = Series::new(vec![1000], vec![10.0, 20.0]);
            assert!(matches!(
                result,
                Err(MetricsError::InvalidSample { .. })
            ));
        }

        #[test]
        fn push_appends_in_order() {
            let mut series = Series::empty();
            series.push(2000, 2.0);
            series.push(1000, 1.0);

            // Wire order is preserved, not sorted
            let points: Vec<(i64, f64)> = series.points().collect();
            assert_eq!(points, vec![(2000, 2.0), (1000, 1.0)]);
        }
    }

    mod timestamp_tests {
        use super::*;

        #[test]
        fn whole_seconds_convert_exactly() {
            assert_eq!(millis_from_wire_seconds(1_588_853_225.0), 1_588_853_225_000);
        }

        #[test]
        fn fractional_seconds_stay_distinct() {
            let a = millis_from_wire_seconds(1_588_853_225.194);
            let b = millis_from_wire_seconds(1_588_853_225.195);
            assert_eq!(a, 1_588_853_225_194);
            assert_ne!(a, b);
        }
    }
}
