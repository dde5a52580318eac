//! FairVal Core: technical indicators, signals, support/resistance, valuation.
//!
//! This crate is the pure analysis engine behind a stock recommendation:
//! - Domain types (validated price bars and series)
//! - Indicator battery (RSI, MACD, Bollinger, SMA/EMA, ATR, OBV, VWAP)
//! - Signal votes aggregated into a technical rating
//! - Support/resistance levels from clustered local extrema
//! - Multi-method fair value with an industry comparison
//! - Recommendation combining both halves, with a confidence score
//!
//! Nothing here performs I/O beyond optional config file loading, and nothing
//! installs a tracing subscriber.

pub mod analysis;
pub mod config;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod levels;
pub mod recommend;
pub mod signals;
pub mod snapshot;
pub mod valuation;

pub use analysis::{analyze, analyze_detailed, Analysis};
pub use config::{ConfigError, EngineConfig, IndicatorParams};
pub use domain::{BarError, PriceBar, TimeSeries};
pub use error::EngineError;
pub use levels::{detect_levels, LevelKind, LevelParams, SupportResistanceLevel};
pub use recommend::{recommend, Action, RecommendationPolicy, RecommendationResult};
pub use signals::{generate_signals, Rating, SignalParams, SignalVote, TechnicalAssessment, Verdict};
pub use snapshot::{compute_indicators, IndicatorSnapshot};
pub use valuation::{
    value_stock, BlendedFairValue, FairValueEstimate, IndustryBenchmark, ValuationError,
    ValuationInputs, ValuationMethod, ValuationPolicy, ValuationReport, ValuationVerdict,
};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: public types are Send + Sync so batches can fan out
    /// across threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<PriceBar>();
        require_sync::<PriceBar>();
        require_send::<TimeSeries>();
        require_sync::<TimeSeries>();

        // Indicators
        require_send::<indicators::Rsi>();
        require_sync::<indicators::Rsi>();
        require_send::<indicators::Macd>();
        require_sync::<indicators::Macd>();
        require_send::<indicators::Bollinger>();
        require_sync::<indicators::Bollinger>();
        require_send::<indicators::Vwap>();
        require_sync::<indicators::Vwap>();
        require_send::<IndicatorSnapshot>();
        require_sync::<IndicatorSnapshot>();

        // Analysis results
        require_send::<TechnicalAssessment>();
        require_sync::<TechnicalAssessment>();
        require_send::<SupportResistanceLevel>();
        require_sync::<SupportResistanceLevel>();
        require_send::<ValuationReport>();
        require_sync::<ValuationReport>();
        require_send::<RecommendationResult>();
        require_sync::<RecommendationResult>();
        require_send::<Analysis>();
        require_sync::<Analysis>();

        // Configuration and errors
        require_send::<EngineConfig>();
        require_sync::<EngineConfig>();
        require_send::<IndustryBenchmark>();
        require_sync::<IndustryBenchmark>();
        require_send::<EngineError>();
        require_sync::<EngineError>();
    }

    /// Indicators are usable as trait objects so callers can assemble their own battery.
    #[test]
    fn indicators_are_object_safe() {
        let battery: Vec<Box<dyn indicators::Indicator>> = vec![
            Box::new(indicators::Sma::new(20)),
            Box::new(indicators::Rsi::new(14)),
            Box::new(indicators::Obv::new()),
        ];
        let names: Vec<&str> = battery.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["sma_20", "rsi_14", "obv"]);
    }
}
