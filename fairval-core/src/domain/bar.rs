//! PriceBar: the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a bar or a series of bars is rejected at ingestion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BarError {
    #[error("{date}: {field} must be positive and finite, got {value}")]
    NonPositivePrice {
        date: NaiveDate,
        field: &'static str,
        value: f64,
    },
    #[error("{date}: high {high} is below low {low}")]
    HighBelowLow { date: NaiveDate, high: f64, low: f64 },
    #[error("{date}: {field} {value} lies outside the [low, high] range [{low}, {high}]")]
    OutOfRange {
        date: NaiveDate,
        field: &'static str,
        value: f64,
        low: f64,
        high: f64,
    },
    #[error("duplicate bar date {0}")]
    DuplicateDate(NaiveDate),
    #[error("bar dated {current} follows {previous}; dates must be strictly increasing")]
    NonMonotonicDate {
        previous: NaiveDate,
        current: NaiveDate,
    },
    #[error("a price series needs at least one bar")]
    EmptySeries,
}

/// Daily OHLCV bar.
///
/// Fields are private: a `PriceBar` can only be obtained through [`PriceBar::new`]
/// (or deserialization, which routes through the same checks), so every bar that
/// reaches the engine is sane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBar", into = "RawBar")]
pub struct PriceBar {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// Unvalidated wire form of a bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBar {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl TryFrom<RawBar> for PriceBar {
    type Error = BarError;

    fn try_from(raw: RawBar) -> Result<Self, Self::Error> {
        PriceBar::new(raw.date, raw.open, raw.high, raw.low, raw.close, raw.volume)
    }
}

impl From<PriceBar> for RawBar {
    fn from(bar: PriceBar) -> Self {
        RawBar {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

impl PriceBar {
    /// Validate and build a bar.
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, BarError> {
        for (field, value) in [("open", open), ("high", high), ("low", low), ("close", close)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BarError::NonPositivePrice { date, field, value });
            }
        }
        if high < low {
            return Err(BarError::HighBelowLow { date, high, low });
        }
        for (field, value) in [("open", open), ("close", close)] {
            if value > high || value < low {
                return Err(BarError::OutOfRange {
                    date,
                    field,
                    value,
                    low,
                    high,
                });
            }
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn open(&self) -> f64 {
        self.open
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn close(&self) -> f64 {
        self.close
    }

    pub fn volume(&self) -> u64 {
        self.volume
    }

    /// (high + low + close) / 3, the price VWAP weights by volume.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}
