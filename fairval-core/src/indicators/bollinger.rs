//! Bollinger Bands.
//!
//! middle = SMA(period) of the close, upper/lower = middle ± multiplier × the
//! sample standard deviation (n - 1) of the same window. Each band is its own
//! `Indicator` instance; `Bands` carries all three for one window.

use serde::{Deserialize, Serialize};

use super::Indicator;
use crate::domain::PriceBar;

/// Which band of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

/// The three bands over one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl Bands {
    /// Bands over `window`, which must hold at least two values.
    pub fn from_window(window: &[f64], multiplier: f64) -> Self {
        let n = window.len() as f64;
        let middle = window.iter().sum::<f64>() / n;
        let sum_sq: f64 = window.iter().map(|v| (v - middle).powi(2)).sum();
        let spread = multiplier * (sum_sq / (n - 1.0)).sqrt();
        Self {
            upper: middle + spread,
            middle,
            lower: middle - spread,
        }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Position of `close` inside the bands: 0 at the lower band, 1 at the
    /// upper. A zero-width band reports 0.5.
    pub fn percent_b(&self, close: f64) -> f64 {
        let width = self.width();
        if width > 0.0 {
            (close - self.lower) / width
        } else {
            0.5
        }
    }

    fn get(&self, band: BollingerBand) -> f64 {
        match band {
            BollingerBand::Upper => self.upper,
            BollingerBand::Middle => self.middle,
            BollingerBand::Lower => self.lower,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    fn with_band(period: usize, multiplier: f64, band: BollingerBand) -> Self {
        assert!(period >= 2, "Bollinger period must be >= 2");
        let label = match band {
            BollingerBand::Upper => "upper",
            BollingerBand::Middle => "middle",
            BollingerBand::Lower => "lower",
        };
        Self {
            period,
            multiplier,
            band,
            name: format!("bollinger_{label}_{period}_{multiplier}"),
        }
    }

    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Upper)
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Middle)
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Lower)
    }

    /// Bands over the trailing window of `closes`, if it is long enough.
    pub fn latest_bands(closes: &[f64], period: usize, multiplier: f64) -> Option<Bands> {
        if period < 2 || closes.len() < period {
            return None;
        }
        Some(Bands::from_window(&closes[closes.len() - period..], multiplier))
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(PriceBar::close).collect();
        let mut out = vec![f64::NAN; self.lookback().min(closes.len())];
        out.extend(
            closes
                .windows(self.period)
                .map(|w| Bands::from_window(w, self.multiplier).get(self.band)),
        );
        out
    }
}
