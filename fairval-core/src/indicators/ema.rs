//! Exponential Moving Average (EMA).
//!
//! alpha = 2 / (period + 1). The first value is the plain mean of the first
//! `period` inputs; each later one moves toward the input by alpha. Every EMA in
//! the crate (EMA12/EMA26 and the MACD signal line) is seeded this way.

use super::Indicator;
use crate::domain::PriceBar;

/// Running EMA fed one sample at a time.
#[derive(Debug, Clone)]
pub struct EmaSmoother {
    period: usize,
    alpha: f64,
    seen: usize,
    value: f64,
}

impl EmaSmoother {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            alpha: 2.0 / (period as f64 + 1.0),
            seen: 0,
            value: 0.0,
        }
    }

    /// Feed one sample; returns the EMA once the seed window is full.
    pub fn push(&mut self, x: f64) -> Option<f64> {
        self.seen += 1;
        let step = if self.seen <= self.period {
            1.0 / self.seen as f64
        } else {
            self.alpha
        };
        // Written as a step toward x so a constant input stays exactly constant.
        self.value += step * (x - self.value);
        (self.seen >= self.period).then_some(self.value)
    }
}

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema_{period}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(PriceBar::close).collect();
        ema_of_series(&closes, self.period)
    }
}

/// EMA over an arbitrary series, aligned with the input.
///
/// Leading `NaN`s (another indicator's warm-up) are skipped and the seed window
/// starts at the first real value. Any later `NaN` ends the output there.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    let Some(start) = values.iter().position(|v| !v.is_nan()) else {
        return out;
    };
    if period == 0 {
        return out;
    }

    let mut smoother = EmaSmoother::new(period);
    for (slot, &x) in out[start..].iter_mut().zip(&values[start..]) {
        if x.is_nan() {
            break;
        }
        if let Some(v) = smoother.push(x) {
            *slot = v;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn single_period_tracks_the_close() {
        let closes = [42.0, 40.5, 47.25];
        let out = Ema::new(1).compute(&make_bars(&closes));
        assert_eq!(out, closes.to_vec());
    }

    #[test]
    fn seeded_then_smoothed() {
        // alpha 0.5, seed mean(20, 22, 24) = 22, then 22 + 0.5*(30-22) = 26, 26 + 0.5*(18-26) = 22
        let out = Ema::new(3).compute(&make_bars(&[20.0, 22.0, 24.0, 30.0, 18.0]));
        assert!(out[..2].iter().all(|v| v.is_nan()));
        assert_approx(out[2], 22.0, DEFAULT_EPSILON);
        assert_approx(out[3], 26.0, DEFAULT_EPSILON);
        assert_approx(out[4], 22.0, DEFAULT_EPSILON);
    }

    #[test]
    fn warmup_nans_shift_the_seed() {
        let values = [f64::NAN, f64::NAN, f64::NAN, 4.0, 8.0, 12.0];
        let out = ema_of_series(&values, 2);
        assert!(out[..4].iter().all(|v| v.is_nan()));
        assert_approx(out[4], 6.0, DEFAULT_EPSILON);
        // alpha 2/3
        assert_approx(out[5], 6.0 + 4.0, DEFAULT_EPSILON);
    }

    #[test]
    fn later_nan_ends_the_output() {
        let out = ema_of_series(&[3.0, 5.0, f64::NAN, 9.0, 11.0], 2);
        assert_approx(out[1], 4.0, DEFAULT_EPSILON);
        assert!(out[2..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn smoother_holds_constant_input() {
        let mut s = EmaSmoother::new(12);
        let last = (0..200).filter_map(|_| s.push(101.37)).last();
        assert_eq!(last, Some(101.37));
    }

    #[test]
    fn nan_inside_seed_window_yields_nothing() {
        let values = [10.0, f64::NAN, 12.0, 13.0];
        assert!(ema_of_series(&values, 3).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn too_short_for_the_seed() {
        let ema = Ema::new(26);
        assert_eq!(ema.lookback(), 25);
        assert_eq!(ema.min_bars(), 26);
        assert!(ema.compute(&make_bars(&[7.0; 25])).iter().all(|v| v.is_nan()));
    }
}
