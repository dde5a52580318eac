//! On-Balance Volume (OBV).
//!
//! Running total starting at 0 on the first bar: add the bar's volume on an
//! up close, subtract it on a down close, carry it unchanged on a flat close.
//! Lookback: 0.

use super::Indicator;
use crate::domain::PriceBar;

#[derive(Debug, Clone, Default)]
pub struct Obv;

impl Obv {
    pub fn new() -> Self {
        Self
    }
}

impl Indicator for Obv {
    fn name(&self) -> &str {
        "obv"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let mut result = Vec::with_capacity(bars.len());
        let mut total = 0.0;
        for (i, bar) in bars.iter().enumerate() {
            if i > 0 {
                let prev = bars[i - 1].close();
                let volume = bar.volume() as f64;
                if bar.close() > prev {
                    total += volume;
                } else if bar.close() < prev {
                    total -= volume;
                }
            }
            result.push(total);
        }
        result
    }
}

/// Least-squares slope of `values` against their index.
///
/// Returns 0.0 for fewer than two points.
pub fn linear_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n_f;
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        num += dx * (y - mean_y);
        den += dx * dx;
    }
    num / den
}
