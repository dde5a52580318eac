//! Latest-value snapshot of the indicator battery.
//!
//! `compute_indicators` runs every configured indicator over the series and keeps
//! the most recent value of each. An indicator without enough history is left
//! out of the snapshot and recorded in `unavailable`; it never stops the others.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{ConfigError, IndicatorParams};
use crate::domain::TimeSeries;
use crate::indicators::{
    last_valid, Atr, Bollinger, Ema, Indicator, Macd, Obv, Rsi, Sma, Unavailable, Vwap,
};

/// RSI with the Wilder averages behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiReading {
    pub value: f64,
    pub avg_gain: f64,
    pub avg_loss: f64,
}

impl RsiReading {
    /// True when the smoothing window saw no price change at all.
    pub fn is_flat(&self) -> bool {
        self.avg_gain == 0.0 && self.avg_loss == 0.0
    }
}

/// Latest MACD triple, plus the previous histogram for crossover detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdReading {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
    pub prev_histogram: Option<f64>,
}

/// Latest Bollinger band triple with derived width and %B.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerReading {
    pub upper: f64,
    pub mid: f64,
    pub lower: f64,
    /// upper - lower
    pub width: f64,
    /// Position of the close inside the band; 0.5 when the band has zero width.
    pub percent_b: f64,
}

/// Latest indicator values for one series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub rsi: Option<RsiReading>,
    pub macd: Option<MacdReading>,
    pub bollinger: Option<BollingerReading>,
    /// SMA value keyed by period.
    pub sma: BTreeMap<usize, f64>,
    /// EMA value keyed by period.
    pub ema: BTreeMap<usize, f64>,
    pub atr: Option<f64>,
    pub obv: Option<f64>,
    pub vwap: Option<f64>,
    pub unavailable: Vec<Unavailable>,
}

impl IndicatorSnapshot {
    pub fn sma(&self, period: usize) -> Option<f64> {
        self.sma.get(&period).copied()
    }

    pub fn ema(&self, period: usize) -> Option<f64> {
        self.ema.get(&period).copied()
    }

    pub fn is_available(&self, indicator: &str) -> bool {
        !self.unavailable.iter().any(|u| u.indicator == indicator)
    }
}

/// Compute the latest value of every configured indicator.
///
/// Fails only on invalid `params`; short history is reported per indicator.
pub fn compute_indicators(
    series: &TimeSeries,
    params: &IndicatorParams,
) -> Result<IndicatorSnapshot, ConfigError> {
    params.validate()?;
    let bars = series.bars();
    let close = series.last_close();
    let mut unavailable = Vec::new();

    let rsi_indicator = Rsi::new(params.rsi_period);
    let rsi = match rsi_indicator.averages(bars).last().copied().flatten() {
        Some(avg) => Some(RsiReading {
            value: avg.rsi(),
            avg_gain: avg.avg_gain,
            avg_loss: avg.avg_loss,
        }),
        None => {
            note(
                &mut unavailable,
                Unavailable::new(rsi_indicator.name(), rsi_indicator.min_bars(), bars.len()),
            );
            None
        }
    };

    let macd_indicator = Macd::histogram(params.macd_fast, params.macd_slow, params.macd_signal);
    let macd_series = macd_indicator.series(bars);
    let macd = match (
        last_valid(&macd_series.line),
        last_valid(&macd_series.signal),
        last_valid(&macd_series.histogram),
    ) {
        (Some(line), Some(signal), Some(histogram)) => {
            let n = macd_series.histogram.len();
            let prev_histogram = Some(macd_series.histogram[n - 2]).filter(|v| v.is_finite());
            Some(MacdReading {
                line,
                signal,
                histogram,
                prev_histogram,
            })
        }
        _ => {
            note(
                &mut unavailable,
                Unavailable::new("macd", macd_indicator.min_bars(), bars.len()),
            );
            None
        }
    };

    let bollinger = match Bollinger::latest_bands(
        &series.closes(),
        params.bollinger_period,
        params.bollinger_multiplier,
    ) {
        Some(bands) => Some(BollingerReading {
            upper: bands.upper,
            mid: bands.middle,
            lower: bands.lower,
            width: bands.width(),
            percent_b: bands.percent_b(close),
        }),
        None => {
            note(
                &mut unavailable,
                Unavailable::new("bollinger", params.bollinger_period, bars.len()),
            );
            None
        }
    };

    let mut sma = BTreeMap::new();
    for &period in &params.sma_periods {
        if let Some(v) = latest_or_note(&Sma::new(period), series, &mut unavailable) {
            sma.insert(period, v);
        }
    }

    let mut ema = BTreeMap::new();
    for &period in &params.ema_periods {
        if let Some(v) = latest_or_note(&Ema::new(period), series, &mut unavailable) {
            ema.insert(period, v);
        }
    }

    let atr = latest_or_note(&Atr::new(params.atr_period), series, &mut unavailable);
    let obv = latest_or_note(&Obv::new(), series, &mut unavailable);
    let vwap = latest_or_note(&Vwap::from_window(params.vwap_window), series, &mut unavailable);

    Ok(IndicatorSnapshot {
        close,
        rsi,
        macd,
        bollinger,
        sma,
        ema,
        atr,
        obv,
        vwap,
        unavailable,
    })
}

fn note(unavailable: &mut Vec<Unavailable>, u: Unavailable) {
    tracing::debug!(
        indicator = %u.indicator,
        required = u.required,
        available = u.available,
        "indicator unavailable"
    );
    unavailable.push(u);
}

fn latest_or_note(
    indicator: &dyn Indicator,
    series: &TimeSeries,
    unavailable: &mut Vec<Unavailable>,
) -> Option<f64> {
    match indicator.latest(series.bars()) {
        Ok(v) => Some(v),
        Err(u) => {
            note(unavailable, u);
            None
        }
    }
}
