//! Signal generation: indicator readings to votes to a technical rating.
//!
//! Each rule looks at one indicator family and casts a `SignalVote`. Rules
//! whose indicator is missing from the snapshot cast no vote. The votes are
//! aggregated by plurality into a `Rating`.

pub mod verdict;

pub use verdict::{Rating, Verdict};

use serde::{Deserialize, Serialize};

use crate::config::{invalid_unless, ConfigError};
use crate::domain::TimeSeries;
use crate::indicators::obv::linear_slope;
use crate::indicators::{Indicator, Obv};
use crate::snapshot::IndicatorSnapshot;

/// Thresholds for the signal rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalParams {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub percent_b_lower: f64,
    pub percent_b_upper: f64,
    pub trend_fast_sma: usize,
    pub trend_slow_sma: usize,
    /// Trailing bars for the OBV/close slope comparison.
    pub obv_trend_window: usize,
    /// Share of all votes a Bullish/Bearish winner needs to become "Strongly".
    pub strong_fraction: f64,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            percent_b_lower: 0.0,
            percent_b_upper: 1.0,
            trend_fast_sma: 50,
            trend_slow_sma: 200,
            obv_trend_window: 10,
            strong_fraction: 0.75,
        }
    }
}

impl SignalParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        invalid_unless(
            (0.0..=100.0).contains(&self.rsi_oversold)
                && (0.0..=100.0).contains(&self.rsi_overbought)
                && self.rsi_oversold < self.rsi_overbought,
            "rsi_oversold",
            "RSI thresholds must satisfy 0 <= oversold < overbought <= 100",
        )?;
        invalid_unless(
            self.percent_b_lower.is_finite()
                && self.percent_b_upper.is_finite()
                && self.percent_b_lower < self.percent_b_upper,
            "percent_b_lower",
            "must be finite and below percent_b_upper",
        )?;
        invalid_unless(
            self.trend_fast_sma >= 1 && self.trend_fast_sma < self.trend_slow_sma,
            "trend_fast_sma",
            "must be >= 1 and shorter than trend_slow_sma",
        )?;
        invalid_unless(self.obv_trend_window >= 2, "obv_trend_window", "must be >= 2")?;
        invalid_unless(
            self.strong_fraction > 0.0 && self.strong_fraction <= 1.0,
            "strong_fraction",
            "must be in (0, 1]",
        )
    }
}

/// One rule's vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalVote {
    pub indicator: String,
    pub verdict: Verdict,
    /// The reading the verdict was based on.
    pub value: f64,
}

impl SignalVote {
    fn new(indicator: impl Into<String>, verdict: Verdict, value: f64) -> Self {
        Self {
            indicator: indicator.into(),
            verdict,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAssessment {
    pub rating: Rating,
    pub signals: Vec<SignalVote>,
}

/// Turn the snapshot into votes and aggregate them.
pub fn generate_signals(
    snapshot: &IndicatorSnapshot,
    series: &TimeSeries,
    params: &SignalParams,
) -> TechnicalAssessment {
    let mut signals = Vec::with_capacity(5);

    if let Some(rsi) = snapshot.rsi {
        let verdict = if rsi.is_flat() {
            Verdict::Neutral
        } else if rsi.value < params.rsi_oversold {
            Verdict::Bullish
        } else if rsi.value > params.rsi_overbought {
            Verdict::Bearish
        } else {
            Verdict::Neutral
        };
        signals.push(SignalVote::new("rsi", verdict, rsi.value));
    }

    if let Some(macd) = snapshot.macd {
        let verdict = match macd.prev_histogram {
            Some(prev) => histogram_cross(prev, macd.histogram),
            None => Verdict::Neutral,
        };
        signals.push(SignalVote::new("macd", verdict, macd.histogram));
    }

    if let Some(bb) = snapshot.bollinger {
        let verdict = if bb.percent_b < params.percent_b_lower {
            Verdict::Bullish
        } else if bb.percent_b > params.percent_b_upper {
            Verdict::Bearish
        } else {
            Verdict::Neutral
        };
        signals.push(SignalVote::new("bollinger", verdict, bb.percent_b));
    }

    if let (Some(fast), Some(slow)) = (
        snapshot.sma(params.trend_fast_sma),
        snapshot.sma(params.trend_slow_sma),
    ) {
        let close = snapshot.close;
        let verdict = if close > fast && close > slow {
            Verdict::Bullish
        } else if close < fast && close < slow {
            Verdict::Bearish
        } else {
            Verdict::Neutral
        };
        signals.push(SignalVote::new("sma_trend", verdict, close));
    }

    if series.len() >= params.obv_trend_window {
        let obv = Obv::new().compute(series.bars());
        let start = obv.len() - params.obv_trend_window;
        let obv_slope = linear_slope(&obv[start..]);
        let closes = series.closes();
        let price_slope = linear_slope(&closes[start..]);
        signals.push(SignalVote::new(
            "obv_trend",
            slope_agreement(obv_slope, price_slope),
            obv_slope,
        ));
    }

    let rating = aggregate(&signals, params.strong_fraction);
    TechnicalAssessment { rating, signals }
}

/// A cross counts on the bar the histogram leaves zero.
fn histogram_cross(prev: f64, current: f64) -> Verdict {
    if prev <= 0.0 && current > 0.0 {
        Verdict::Bullish
    } else if prev >= 0.0 && current < 0.0 {
        Verdict::Bearish
    } else {
        Verdict::Neutral
    }
}

fn slope_agreement(obv_slope: f64, price_slope: f64) -> Verdict {
    if obv_slope > 0.0 && price_slope > 0.0 {
        Verdict::Bullish
    } else if obv_slope < 0.0 && price_slope < 0.0 {
        Verdict::Bearish
    } else if obv_slope * price_slope < 0.0 {
        Verdict::NeutralCautious
    } else {
        Verdict::Neutral
    }
}

/// Plurality vote with equal weights. Ties for the top count are Neutral.
pub fn aggregate(votes: &[SignalVote], strong_fraction: f64) -> Rating {
    let total = votes.len();
    if total == 0 {
        return Rating::Neutral;
    }
    let bullish = votes.iter().filter(|v| v.verdict == Verdict::Bullish).count();
    let bearish = votes.iter().filter(|v| v.verdict == Verdict::Bearish).count();
    let neutral = total - bullish - bearish;

    let strong = |count: usize| count as f64 / total as f64 >= strong_fraction;
    if bullish > bearish && bullish > neutral {
        if strong(bullish) {
            Rating::StronglyBullish
        } else {
            Rating::Bullish
        }
    } else if bearish > bullish && bearish > neutral {
        if strong(bearish) {
            Rating::StronglyBearish
        } else {
            Rating::Bearish
        }
    } else {
        Rating::Neutral
    }
}
