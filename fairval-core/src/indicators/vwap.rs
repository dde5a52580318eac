//! Volume-Weighted Average Price (VWAP).
//!
//! VWAP = Σ(typical_price × volume) / Σ volume, typical = (high + low + close) / 3.
//! Session-to-date semantics: with no window the session is the whole series
//! (cumulative from bar 0); with `window = n` each value covers the trailing n bars.
//! A window whose total volume is zero yields `NaN` instead of dividing by zero.

use super::Indicator;
use crate::domain::PriceBar;

#[derive(Debug, Clone)]
pub struct Vwap {
    window: Option<usize>,
    name: String,
}

impl Vwap {
    /// Cumulative VWAP over the whole series.
    pub fn session() -> Self {
        Self {
            window: None,
            name: "vwap".to_string(),
        }
    }

    /// VWAP over the trailing `window` bars.
    pub fn trailing(window: usize) -> Self {
        assert!(window >= 1, "VWAP window must be >= 1");
        Self {
            window: Some(window),
            name: format!("vwap_{window}"),
        }
    }

    pub fn from_window(window: Option<usize>) -> Self {
        match window {
            Some(w) => Self::trailing(w),
            None => Self::session(),
        }
    }
}

impl Indicator for Vwap {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window.map_or(0, |w| w - 1)
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        let mut pv = 0.0;
        let mut vol = 0.0;
        for i in 0..n {
            let bar = &bars[i];
            pv += bar.typical_price() * bar.volume() as f64;
            vol += bar.volume() as f64;

            if let Some(w) = self.window {
                if i >= w {
                    let leaving = &bars[i - w];
                    pv -= leaving.typical_price() * leaving.volume() as f64;
                    vol -= leaving.volume() as f64;
                }
                if i + 1 < w {
                    continue;
                }
            }

            if vol > 0.0 {
                result[i] = pv / vol;
            }
        }

        result
    }
}
