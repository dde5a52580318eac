//! Moving Average Convergence Divergence (MACD).
//!
//! line = EMA(fast) - EMA(slow)
//! signal = EMA(signal_period) of the line
//! histogram = line - signal
//!
//! All three EMAs use the SMA seed from `ema_of_series`.
//! Lookback: line slow-1, signal/histogram slow+signal-2.

use super::ema::ema_of_series;
use super::Indicator;
use crate::domain::PriceBar;

/// Which MACD output an instance computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdComponent {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    component: MacdComponent,
    name: String,
}

/// All three MACD outputs, aligned with the input bars.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize, component: MacdComponent) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be shorter than slow period");
        let label = match component {
            MacdComponent::Line => "line",
            MacdComponent::Signal => "signal",
            MacdComponent::Histogram => "histogram",
        };
        Self {
            fast,
            slow,
            signal,
            component,
            name: format!("macd_{label}_{fast}_{slow}_{signal}"),
        }
    }

    pub fn line(fast: usize, slow: usize, signal: usize) -> Self {
        Self::new(fast, slow, signal, MacdComponent::Line)
    }

    pub fn signal_line(fast: usize, slow: usize, signal: usize) -> Self {
        Self::new(fast, slow, signal, MacdComponent::Signal)
    }

    pub fn histogram(fast: usize, slow: usize, signal: usize) -> Self {
        Self::new(fast, slow, signal, MacdComponent::Histogram)
    }

    /// Compute line, signal and histogram in one pass.
    pub fn series(&self, bars: &[PriceBar]) -> MacdSeries {
        let closes: Vec<f64> = bars.iter().map(PriceBar::close).collect();
        let fast = ema_of_series(&closes, self.fast);
        let slow = ema_of_series(&closes, self.slow);

        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema_of_series(&line, self.signal);
        let histogram = line.iter().zip(&signal).map(|(l, s)| l - s).collect();

        MacdSeries {
            line,
            signal,
            histogram,
        }
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.component {
            MacdComponent::Line => self.slow - 1,
            MacdComponent::Signal | MacdComponent::Histogram => self.slow + self.signal - 2,
        }
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let series = self.series(bars);
        match self.component {
            MacdComponent::Line => series.line,
            MacdComponent::Signal => series.signal,
            MacdComponent::Histogram => series.histogram,
        }
    }
}
