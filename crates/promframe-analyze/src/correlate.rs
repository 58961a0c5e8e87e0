//! Pairwise correlation over a frame's columns.
//!
//! Computes the Pearson correlation coefficient for every pair of frame
//! columns (the shared timestamp axis makes the columns directly
//! comparable), and reports de-duplicated pairs ranked by coefficient so
//! the strongest positive and negative relationships stand out.

use std::io::Write;

use tracing::debug;

use promframe_metrics::Frame;

/// A symmetric matrix of Pearson coefficients over named columns.
///
/// The diagonal is 1. A column with zero variance correlates as `NaN`
/// against everything, including itself; [`CorrelationMatrix::ranked_pairs`]
/// drops those entries.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    /// Row-major square matrix, indexed as `values[row][col]`.
    values: Vec<Vec<f64>>,
}

/// One correlated column pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationPair {
    /// First column name.
    pub left: String,
    /// Second column name.
    pub right: String,
    /// Pearson coefficient in `[-1, 1]`.
    pub coefficient: f64,
}

impl CorrelationMatrix {
    /// Computes the matrix from a frame.
    ///
    /// The timestamp axis is not a column; only series columns participate.
    #[must_use]
    pub fn from_frame(frame: &Frame) -> Self {
        let columns: Vec<String> = frame.column_names().map(str::to_string).collect();
        let series: Vec<&[f64]> = frame.columns().iter().map(|c| c.values.as_slice()).collect();

        let n = columns.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for row in 0..n {
            for col in row..n {
                let r = pearson(series[row], series[col]);
                values[row][col] = r;
                values[col][row] = r;
            }
        }

        debug!(columns = n, "computed correlation matrix");
        Self { columns, values }
    }

    /// Returns the column names, in frame order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the coefficient for a pair of columns, if both exist.
    #[must_use]
    pub fn get(&self, left: &str, right: &str) -> Option<f64> {
        let row = self.columns.iter().position(|c| c == left)?;
        let col = self.columns.iter().position(|c| c == right)?;
        Some(self.values[row][col])
    }

    /// Returns every unordered column pair with a finite coefficient,
    /// sorted ascending. The head of the list is the strongest negative
    /// relationship, the tail the strongest positive one.
    #[must_use]
    pub fn ranked_pairs(&self) -> Vec<CorrelationPair> {
        let mut pairs = Vec::new();
        for row in 0..self.columns.len() {
            for col in (row + 1)..self.columns.len() {
                let coefficient = self.values[row][col];
                if coefficient.is_nan() {
                    continue;
                }
                pairs.push(CorrelationPair {
                    left: self.columns[row].clone(),
                    right: self.columns[col].clone(),
                    coefficient,
                });
            }
        }
        pairs.sort_by(|a, b| {
            a.coefficient
                .partial_cmp(&b.coefficient)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        pairs
    }

    /// Returns the `n` most positively correlated pairs, strongest first.
    #[must_use]
    pub fn strongest(&self, n: usize) -> Vec<CorrelationPair> {
        let mut pairs = self.ranked_pairs();
        pairs.reverse();
        pairs.truncate(n);
        pairs
    }

    /// Returns the `n` most negatively correlated pairs, most negative
    /// first.
    #[must_use]
    pub fn weakest(&self, n: usize) -> Vec<CorrelationPair> {
        let mut pairs = self.ranked_pairs();
        pairs.truncate(n);
        pairs
    }

    /// Writes the matrix as CSV with a leading empty header cell, the
    /// format downstream spreadsheet consumers expect.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_csv(&self, writer: &mut impl Write) -> std::io::Result<()> {
        for name in &self.columns {
            write!(writer, ",{}", csv_escape(name))?;
        }
        writeln!(writer)?;

        for (row, name) in self.columns.iter().enumerate() {
            write!(writer, "{}", csv_escape(name))?;
            for value in &self.values[row] {
                write!(writer, ",{value}")?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

/// Pearson correlation coefficient of two equal-length samples.
///
/// Returns `NaN` for samples shorter than two points or with zero variance
/// on either side, mirroring how statistical frameworks report undefined
/// correlations.
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.len() < 2 {
        return f64::NAN;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    let denominator = (variance_x * variance_y).sqrt();
    if denominator == 0.0 {
        return f64::NAN;
    }
    covariance / denominator
}

fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
