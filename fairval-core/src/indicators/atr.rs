//! Average True Range (ATR).
//!
//! The true range of a bar needs the previous close, so the first bar has none
//! and ATR(n) first appears on bar n, after n true ranges have been averaged.

use super::wilder::WilderSmoother;
use super::Indicator;
use crate::domain::PriceBar;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            name: format!("atr_{period}"),
        }
    }
}

/// max(high - low, |high - prev_close|, |low - prev_close|)
pub fn true_range(bar: &PriceBar, prev_close: f64) -> f64 {
    let span = bar.high() - bar.low();
    span.max((bar.high() - prev_close).abs())
        .max((bar.low() - prev_close).abs())
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let mut smoother = WilderSmoother::new(self.period);
        let mut out = Vec::with_capacity(bars.len());
        if !bars.is_empty() {
            out.push(f64::NAN);
        }
        out.extend(bars.windows(2).map(|w| {
            smoother
                .push(true_range(&w[1], w[0].close()))
                .unwrap_or(f64::NAN)
        }));
        out
    }
}
