//! Relative Strength Index (RSI).
//!
//! Gains and losses of consecutive closes are smoothed separately with
//! `WilderSmoother`; RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! With no losses the RSI is 100, a flat window included; callers that care
//! can tell the two apart from the averages themselves (both zero).

use super::wilder::WilderSmoother;
use super::Indicator;
use crate::domain::PriceBar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

/// Smoothed averages behind one RSI value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WilderAverages {
    pub avg_gain: f64,
    pub avg_loss: f64,
}

impl WilderAverages {
    pub fn rsi(&self) -> f64 {
        if self.avg_loss == 0.0 {
            100.0
        } else if self.avg_gain == 0.0 {
            0.0
        } else {
            100.0 - 100.0 / (1.0 + self.avg_gain / self.avg_loss)
        }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }

    /// Per-bar smoothed gain/loss averages; `None` during warm-up.
    pub fn averages(&self, bars: &[PriceBar]) -> Vec<Option<WilderAverages>> {
        let mut gains = WilderSmoother::new(self.period);
        let mut losses = WilderSmoother::new(self.period);

        let mut out = Vec::with_capacity(bars.len());
        if !bars.is_empty() {
            out.push(None);
        }
        out.extend(bars.windows(2).map(|w| {
            let change = w[1].close() - w[0].close();
            let avg_gain = gains.push(change.max(0.0));
            let avg_loss = losses.push((-change).max(0.0));
            avg_gain
                .zip(avg_loss)
                .map(|(avg_gain, avg_loss)| WilderAverages { avg_gain, avg_loss })
        }));
        out
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        self.averages(bars)
            .into_iter()
            .map(|avg| avg.map_or(f64::NAN, |a| a.rsi()))
            .collect()
    }
}
