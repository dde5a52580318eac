//! Simple Moving Average (SMA) of the close.
//!
//! Each value is the plain mean of its own window, so a flat series gives the
//! exact price back and there is no running-sum drift on long histories.

use super::Indicator;
use crate::domain::PriceBar;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(PriceBar::close).collect();
        sma_of_series(&closes, self.period)
    }
}

/// Trailing mean of `values`, `NaN` until a full window is available.
pub fn sma_of_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return vec![f64::NAN; values.len()];
    }
    let warmup = (period - 1).min(values.len());
    let mut out = vec![f64::NAN; warmup];
    out.extend(
        values
            .windows(period)
            .map(|w| w.iter().sum::<f64>() / period as f64),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn trailing_means() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);
        let sma = Sma::new(5).compute(&bars);
        assert_eq!(sma.len(), 7);
        assert!(sma[..4].iter().all(|v| v.is_nan()));
        assert_approx(sma[4], 12.0, DEFAULT_EPSILON);
        assert_approx(sma[6], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn period_one_is_the_close() {
        let bars = make_bars(&[100.0, 200.0, 300.0]);
        assert_eq!(Sma::new(1).compute(&bars), vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn flat_long_series_is_exact() {
        let sma = Sma::new(200).compute(&make_bars(&[100.0; 250]));
        assert!(sma[198].is_nan());
        assert!(sma[199..].iter().all(|&v| v == 100.0));
    }

    #[test]
    fn short_series_stays_warm_up() {
        let bars = make_bars(&[10.0, 11.0]);
        let sma = Sma::new(5);
        assert_eq!(sma.min_bars(), 5);
        let values = sma.compute(&bars);
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|v| v.is_nan()));
    }
}
