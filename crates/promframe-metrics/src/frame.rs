//! Common-timestamp-axis assembly of a metric store.
//!
//! A [`Frame`] is a disposable tabular view: the sorted union of every
//! timestamp seen across the store's series, with one gap-filled column per
//! series. It exists for hand-off to plotting and correlation consumers and
//! is never persisted back into the store.

use std::collections::{BTreeSet, HashMap};
use std::io::Write;

use crate::error::{MetricsError, Result};
use crate::store::MetricStore;

/// Separator used when joining label values into a column name.
pub const DEFAULT_COLUMN_SEPARATOR: &str = "_";

/// One named, gap-filled column of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name: the series' label values in key-sorted order, joined by
    /// the separator.
    pub name: String,
    /// One value per axis timestamp, gap-filled.
    pub values: Vec<f64>,
}

/// A tabular view over a store: one shared timestamp axis, one column per
/// series.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    timestamps: Vec<i64>,
    columns: Vec<Column>,
}

impl Frame {
    /// Assembles a frame from a store.
    ///
    /// The axis is the sorted, de-duplicated union of all timestamps across
    /// the store. Wherever a series has no observation at an axis timestamp,
    /// `missing_value` is substituted. Column names drop the label keys and
    /// join the values in key-sorted order with `separator`; a store whose
    /// labels were fully projected away yields a single column named `""`.
    ///
    /// The number of distinct timestamps is bounded by the query range and
    /// step (low thousands of points), so everything is assembled in memory.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::DuplicateColumnName` if two series reduce to
    /// the same column name.
    pub fn from_store(
        store: &MetricStore,
        missing_value: f64,
        separator: &str,
    ) -> Result<Self> {
        let mut axis: BTreeSet<i64> = BTreeSet::new();
        for (_, series) in store.iter() {
            axis.extend(series.timestamps().iter().copied());
        }
        let timestamps: Vec<i64> = axis.into_iter().collect();

        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut columns = Vec::with_capacity(store.len());
        for (labels, series) in store.iter() {
            let name = labels.values().collect::<Vec<_>>().join(separator);
            if !seen.insert(name.clone()) {
                return Err(MetricsError::DuplicateColumnName { name });
            }

            let by_timestamp: HashMap<i64, f64> = series.points().collect();
            let values = timestamps
                .iter()
                .map(|ts| by_timestamp.get(ts).copied().unwrap_or(missing_value))
                .collect();

            columns.push(Column { name, values });
        }

        Ok(Self {
            timestamps,
            columns,
        })
    }

    /// Returns the shared timestamp axis, sorted ascending.
    #[must_use]
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Returns the columns, in store (label-set) order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column with the given name, if present.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Iterates over column names in store order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Returns the number of axis timestamps (rows).
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Returns `true` if the frame has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Writes the frame as CSV: a `timestamps` column followed by one column
    /// per series. This is the hand-off format for external charting and
    /// correlation consumers.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_csv(&self, writer: &mut impl Write) -> std::io::Result<()> {
        write!(writer, "timestamps")?;
        for column in &self.columns {
            write!(writer, ",{}", csv_escape(&column.name))?;
        }
        writeln!(writer)?;

        for (row, ts) in self.timestamps.iter().enumerate() {
            write!(writer, "{ts}")?;
            for column in &self.columns {
                write!(writer, ",{}", column.values[row])?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

/// Quotes a CSV field when it contains a delimiter, quote, or newline.
pub(crate) fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
