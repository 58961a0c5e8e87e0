//! Query windows for range queries.
//!
//! A [`QueryWindow`] is the start/end/step triple a range query needs.
//! Constructors mirror the workflows the analysis scripts actually use:
//! "the last N hours" and "the N hours ending at a given instant" (for
//! walking backwards through history window by window).

use chrono::{DateTime, Duration, Utc};

use crate::error::{ClientError, Result};

/// Default resolution step, in seconds.
pub const DEFAULT_STEP_SECONDS: u32 = 60;

/// An inclusive time window plus resolution step for a range query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    /// Window start (inclusive).
    pub start: DateTime<Utc>,
    /// Window end (inclusive).
    pub end: DateTime<Utc>,
    /// Resolution step in seconds.
    pub step_seconds: u32,
}

impl QueryWindow {
    /// Creates a window from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidWindow` if `start > end` or the step is
    /// zero.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, step_seconds: u32) -> Result<Self> {
        if start > end {
            return Err(ClientError::InvalidWindow {
                reason: format!("start {start} is after end {end}"),
            });
        }
        if step_seconds == 0 {
            return Err(ClientError::InvalidWindow {
                reason: "step must be at least one second".to_string(),
            });
        }
        Ok(Self {
            start,
            end,
            step_seconds,
        })
    }

    /// The window spanning the last `hours` hours, ending now.
    #[must_use]
    pub fn last_hours(hours: i64, step_seconds: u32) -> Self {
        Self::ending_at(Utc::now(), Duration::hours(hours), step_seconds)
    }

    /// The window spanning the last `days` days, ending now.
    #[must_use]
    pub fn last_days(days: i64, step_seconds: u32) -> Self {
        Self::ending_at(Utc::now(), Duration::days(days), step_seconds)
    }

    /// The window of length `span` ending at `end`.
    ///
    /// Chaining this with the previous window's `start` walks backwards
    /// through history one window at a time.
    ///
    /// Unlike [`QueryWindow::new`] this constructor cannot fail: a zero
    /// step is clamped to one second instead of being rejected.
    #[must_use]
    pub fn ending_at(end: DateTime<Utc>, span: Duration, step_seconds: u32) -> Self {
        Self {
            start: end - span,
            end,
            step_seconds: step_seconds.max(1),
        }
    }

    /// Window start as fractional epoch seconds, the wire parameter form.
    #[must_use]
    pub fn start_epoch(&self) -> f64 {
        Self::epoch_seconds(self.start)
    }

    /// Window end as fractional epoch seconds, the wire parameter form.
    #[must_use]
    pub fn end_epoch(&self) -> f64 {
        Self::epoch_seconds(self.end)
    }

    /// The window's duration.
    #[must_use]
    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    fn epoch_seconds(instant: DateTime<Utc>) -> f64 {
        instant.timestamp_millis() as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_accepts_ordered_bounds() {
        let start = Utc.timestamp_opt(1_588_853_225, 0).unwrap();
        let end = Utc.timestamp_opt(1_588_874_825, 0).unwrap();

        let window = QueryWindow::new(start, end, 86).unwrap();
        assert_eq!(window.span(), Duration::seconds(21_600));
    }

    #[test]
    fn new_rejects_reversed_bounds() {
        let start = Utc.timestamp_opt(2_000, 0).unwrap();
        let end = Utc.timestamp_opt(1_000, 0).unwrap();

        let result = QueryWindow::new(start, end, 60);
        assert!(matches!(result, Err(ClientError::InvalidWindow { .. })));
    }

    #[test]
    fn new_rejects_zero_step() {
        let start = Utc.timestamp_opt(1_000, 0).unwrap();
        let end = Utc.timestamp_opt(2_000, 0).unwrap();

        let result = QueryWindow::new(start, end, 0);
        assert!(matches!(result, Err(ClientError::InvalidWindow { .. })));
    }

    #[test]
    fn ending_at_spans_backwards() {
        let end = Utc.timestamp_opt(1_588_874_825, 0).unwrap();
        let window = QueryWindow::ending_at(end, Duration::hours(4), 60);

        assert_eq!(window.end, end);
        assert_eq!(window.span(), Duration::hours(4));
    }

    #[test]
    fn ending_at_clamps_zero_step_to_one_second() {
        let end = Utc.timestamp_opt(1_588_874_825, 0).unwrap();
        let window = QueryWindow::ending_at(end, Duration::hours(1), 0);
        assert_eq!(window.step_seconds, 1);
    }

    #[test]
    fn chained_windows_walk_backwards_without_gaps() {
        let end = Utc.timestamp_opt(1_588_874_825, 0).unwrap();
        let recent = QueryWindow::ending_at(end, Duration::hours(4), 60);
        let older = QueryWindow::ending_at(recent.start, Duration::hours(4), 60);

        assert_eq!(older.end, recent.start);
        assert_eq!(older.span(), recent.span());
    }

    #[test]
    fn epoch_parameters_carry_fractional_seconds() {
        let end = Utc.timestamp_opt(1_588_874_825, 194_000_000).unwrap();
        let window = QueryWindow::ending_at(end, Duration::hours(1), 60);

        assert!((window.end_epoch() - 1_588_874_825.194).abs() < 1e-6);
    }

    #[test]
    fn last_hours_ends_roughly_now() {
        let window = QueryWindow::last_hours(4, 60);
        assert_eq!(window.span(), Duration::hours(4));
        assert!((Utc::now() - window.end) < Duration::seconds(5));
    }
}
