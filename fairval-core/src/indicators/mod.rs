//! Technical indicators.
//!
//! Every indicator is a pure function of the bar history: bars in, a numeric
//! series of the same length out, with `f64::NAN` while the indicator warms up.
//! Multi-output indicators (Bollinger, MACD) are exposed as one named instance
//! per output so the single-series `Indicator` trait stays unchanged.
//!
//! The engine only needs the latest value of each series; `snapshot` reads them.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod vwap;
pub mod wilder;

pub use atr::Atr;
pub use bollinger::{Bands, Bollinger, BollingerBand};
pub use ema::{Ema, EmaSmoother};
pub use macd::{Macd, MacdComponent, MacdSeries};
pub use obv::Obv;
pub use rsi::Rsi;
pub use sma::Sma;
pub use vwap::Vwap;
pub use wilder::WilderSmoother;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PriceBar;

/// Trait for indicators.
///
/// `compute` returns a `Vec<f64>` as long as `bars`; the first `lookback()`
/// values are `f64::NAN`. No value at bar t may depend on bars after t.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "atr_14").
    fn name(&self) -> &str;

    /// Number of leading warm-up bars that produce `NaN`.
    fn lookback(&self) -> usize;

    /// Minimum series length for at least one valid value.
    fn min_bars(&self) -> usize {
        self.lookback() + 1
    }

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[PriceBar]) -> Vec<f64>;

    /// Latest valid value, or why there is none.
    fn latest(&self, bars: &[PriceBar]) -> Result<f64, Unavailable> {
        if bars.len() < self.min_bars() {
            return Err(Unavailable::new(self.name(), self.min_bars(), bars.len()));
        }
        match self.compute(bars).last().copied() {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(Unavailable::new(self.name(), self.min_bars(), bars.len())),
        }
    }
}

/// An indicator that could not produce a value for the supplied series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("insufficient data for {indicator}: needs {required} bars, series has {available}")]
pub struct Unavailable {
    pub indicator: String,
    pub required: usize,
    pub available: usize,
}

impl Unavailable {
    pub fn new(indicator: impl Into<String>, required: usize, available: usize) -> Self {
        Self {
            indicator: indicator.into(),
            required,
            available,
        }
    }
}

/// Latest non-NaN value of a series.
pub(crate) fn last_valid(values: &[f64]) -> Option<f64> {
    values.last().copied().filter(|v| v.is_finite())
}

/// Create synthetic bars from close prices for testing.
///
/// open = prev_close (or close for the first bar), high = max(open, close) + 1,
/// low = min(open, close) - 1 floored at half the close, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<PriceBar> {
    let volumes = vec![1000; closes.len()];
    make_bars_with_volume(closes, &volumes)
}

/// Like [`make_bars`] with an explicit volume per bar.
#[cfg(test)]
pub fn make_bars_with_volume(closes: &[f64], volumes: &[u64]) -> Vec<PriceBar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = (open.min(close) - 1.0).max(close.min(open) * 0.5);
            PriceBar::new(
                base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume,
            )
            .unwrap()
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
