//! Wilder's running average, shared by RSI and ATR.

/// Arithmetic mean of the first `period` samples, then
/// `avg = (avg * (period - 1) + x) / period` for every later sample.
#[derive(Debug, Clone)]
pub struct WilderSmoother {
    period: usize,
    seen: usize,
    avg: f64,
}

impl WilderSmoother {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Wilder period must be >= 1");
        Self {
            period,
            seen: 0,
            avg: 0.0,
        }
    }

    /// Feed one sample; returns the average once the seed window is full.
    pub fn push(&mut self, x: f64) -> Option<f64> {
        self.seen += 1;
        if self.seen <= self.period {
            // Incremental mean over the seed window.
            self.avg += (x - self.avg) / self.seen as f64;
        } else {
            self.avg += (x - self.avg) / self.period as f64;
        }
        self.value()
    }

    pub fn value(&self) -> Option<f64> {
        (self.seen >= self.period).then_some(self.avg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn seeds_with_mean_then_smooths() {
        let mut s = WilderSmoother::new(3);
        assert_eq!(s.push(8.0), None);
        assert_eq!(s.push(9.0), None);
        assert_approx(s.push(6.0).unwrap(), 23.0 / 3.0, DEFAULT_EPSILON);
        assert_approx(s.push(6.0).unwrap(), 64.0 / 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn constant_input_is_exact() {
        let mut s = WilderSmoother::new(14);
        let mut last = None;
        for _ in 0..100 {
            last = s.push(2.5);
        }
        assert_eq!(last, Some(2.5));
    }

    #[test]
    fn period_one_tracks_input() {
        let mut s = WilderSmoother::new(1);
        assert_eq!(s.push(4.0), Some(4.0));
        assert_eq!(s.push(7.0), Some(7.0));
    }
}
