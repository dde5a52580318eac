//! TimeSeries: validated, date-ordered sequence of bars.

use serde::{Deserialize, Serialize};

use super::bar::{BarError, PriceBar};

/// Ordered OHLCV history for one instrument.
///
/// Invariants (checked once, at construction):
/// - at least one bar
/// - dates strictly increasing, so no duplicates
///
/// Gaps between dates (weekends, holidays) are not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PriceBar>", into = "Vec<PriceBar>")]
pub struct TimeSeries {
    bars: Vec<PriceBar>,
}

impl TimeSeries {
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, BarError> {
        if bars.is_empty() {
            return Err(BarError::EmptySeries);
        }
        for pair in bars.windows(2) {
            let (previous, current) = (pair[0].date(), pair[1].date());
            if current == previous {
                return Err(BarError::DuplicateDate(current));
            }
            if current < previous {
                return Err(BarError::NonMonotonicDate { previous, current });
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; present for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Most recent bar.
    pub fn last(&self) -> &PriceBar {
        // Non-empty by construction.
        &self.bars[self.bars.len() - 1]
    }

    /// Close of the most recent bar.
    pub fn last_close(&self) -> f64 {
        self.last().close()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(PriceBar::close).collect()
    }

    /// The trailing `n` bars (the whole series when shorter).
    pub fn tail(&self, n: usize) -> &[PriceBar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }
}

impl TryFrom<Vec<PriceBar>> for TimeSeries {
    type Error = BarError;

    fn try_from(bars: Vec<PriceBar>) -> Result<Self, Self::Error> {
        TimeSeries::new(bars)
    }
}

impl From<TimeSeries> for Vec<PriceBar> {
    fn from(series: TimeSeries) -> Self {
        series.bars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar_on(day: u32, close: f64) -> PriceBar {
        PriceBar::new(
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            close,
            close + 1.0,
            close - 1.0,
            close,
            1_000,
        )
        .unwrap()
    }

    #[test]
    fn accepts_ascending_dates() {
        let series = TimeSeries::new(vec![bar_on(1, 10.0), bar_on(4, 11.0), bar_on(5, 12.0)]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.last_close(), 12.0);
        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(TimeSeries::new(vec![]).unwrap_err(), BarError::EmptySeries);
    }

    #[test]
    fn rejects_duplicate_date() {
        let err = TimeSeries::new(vec![bar_on(1, 10.0), bar_on(1, 11.0)]).unwrap_err();
        assert!(matches!(err, BarError::DuplicateDate(_)));
    }

    #[test]
    fn rejects_descending_dates() {
        let err = TimeSeries::new(vec![bar_on(2, 10.0), bar_on(1, 11.0)]).unwrap_err();
        assert!(matches!(err, BarError::NonMonotonicDate { .. }));
    }

    #[test]
    fn tail_caps_at_series_length() {
        let series = TimeSeries::new(vec![bar_on(1, 10.0), bar_on(2, 11.0), bar_on(3, 12.0)]).unwrap();
        assert_eq!(series.tail(2).len(), 2);
        assert_eq!(series.tail(2)[0].close(), 11.0);
        assert_eq!(series.tail(10).len(), 3);
    }

    #[test]
    fn deserialization_checks_ordering() {
        let json = serde_json::to_string(&vec![bar_on(2, 10.0), bar_on(1, 11.0)]).unwrap();
        assert!(serde_json::from_str::<TimeSeries>(&json).is_err());
    }
}
