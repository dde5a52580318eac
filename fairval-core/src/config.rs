//! Engine configuration.
//!
//! Every period, threshold and tolerance the engine uses is a policy constant
//! that lives here rather than in the algorithms. All sections deserialize
//! with defaults, so a TOML file only needs the values it overrides:
//!
//! ```toml
//! [signals]
//! rsi_oversold = 25.0
//!
//! [levels]
//! tolerance_pct = 1.5
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::levels::LevelParams;
use crate::recommend::RecommendationPolicy;
use crate::signals::SignalParams;
use crate::valuation::ValuationPolicy;

/// Invalid caller-supplied parameters or weights.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },
    #[error("invalid weight {weight} for valuation method {method}")]
    InvalidWeight { method: String, weight: f64 },
    #[error("supplied weights give zero total weight to the computable methods ({methods})")]
    NoWeightedMethod { methods: String },
    #[error("failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("failed to parse config TOML: {0}")]
    Parse(String),
}

impl ConfigError {
    pub(crate) fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub(crate) fn invalid_unless(ok: bool, name: &str, reason: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, reason))
    }
}

/// Periods for the indicator battery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_multiplier: f64,
    pub sma_periods: Vec<usize>,
    pub ema_periods: Vec<usize>,
    pub atr_period: usize,
    /// Trailing bars for VWAP; `None` means the whole series.
    pub vwap_window: Option<usize>,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_multiplier: 2.0,
            sma_periods: vec![20, 50, 200],
            ema_periods: vec![12, 26],
            atr_period: 14,
            vwap_window: None,
        }
    }
}

impl IndicatorParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_signal", self.macd_signal),
            ("atr_period", self.atr_period),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(ConfigError::invalid(name, "must be >= 1"));
            }
        }
        if self.macd_slow <= self.macd_fast {
            return Err(ConfigError::invalid(
                "macd_slow",
                format!("must exceed macd_fast ({})", self.macd_fast),
            ));
        }
        if self.bollinger_period < 2 {
            return Err(ConfigError::invalid("bollinger_period", "must be >= 2"));
        }
        if !self.bollinger_multiplier.is_finite() || self.bollinger_multiplier <= 0.0 {
            return Err(ConfigError::invalid("bollinger_multiplier", "must be positive"));
        }
        if self.sma_periods.contains(&0) {
            return Err(ConfigError::invalid("sma_periods", "periods must be >= 1"));
        }
        if self.ema_periods.contains(&0) {
            return Err(ConfigError::invalid("ema_periods", "periods must be >= 1"));
        }
        if self.vwap_window == Some(0) {
            return Err(ConfigError::invalid("vwap_window", "must be >= 1"));
        }
        Ok(())
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub indicators: IndicatorParams,
    pub signals: SignalParams,
    pub levels: LevelParams,
    pub valuation: ValuationPolicy,
    pub recommendation: RecommendationPolicy,
}

impl EngineConfig {
    /// Load a configuration from a TOML file and validate it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string and validate it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.indicators.validate()?;
        self.signals.validate()?;
        self.levels.validate()?;
        self.valuation.validate()?;
        self.recommendation.validate()?;
        invalid_unless(
            self.recommendation.strong_stance_pct >= self.valuation.undervalued_above_pct
                && -self.recommendation.strong_stance_pct <= self.valuation.overvalued_below_pct,
            "recommendation.strong_stance_pct",
            "must lie beyond both valuation thresholds",
        )?;

        for (name, period) in [
            ("signals.trend_fast_sma", self.signals.trend_fast_sma),
            ("signals.trend_slow_sma", self.signals.trend_slow_sma),
        ] {
            if !self.indicators.sma_periods.contains(&period) {
                return Err(ConfigError::invalid(
                    name,
                    format!("SMA {period} is not in indicators.sma_periods"),
                ));
            }
        }
        Ok(())
    }
}
