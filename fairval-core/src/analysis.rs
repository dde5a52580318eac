//! End-to-end analysis of one stock.
//!
//! Indicators and levels are computed from the series, valuation from the
//! fundamentals, and the two halves meet in `recommend`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::domain::TimeSeries;
use crate::error::EngineError;
use crate::levels::{detect_levels, SupportResistanceLevel};
use crate::recommend::{recommend, RecommendationResult};
use crate::signals::{generate_signals, TechnicalAssessment};
use crate::snapshot::{compute_indicators, IndicatorSnapshot};
use crate::valuation::{value_stock, IndustryBenchmark, ValuationInputs, ValuationMethod, ValuationReport};

/// Every intermediate result of an analysis, for callers that want more than
/// the recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub snapshot: IndicatorSnapshot,
    pub technical: TechnicalAssessment,
    pub levels: Vec<SupportResistanceLevel>,
    pub valuation: ValuationReport,
    pub recommendation: RecommendationResult,
}

/// Run the full pipeline and keep the intermediate results.
pub fn analyze_detailed(
    series: &TimeSeries,
    inputs: &ValuationInputs,
    benchmark: &IndustryBenchmark,
    weights: Option<&BTreeMap<ValuationMethod, f64>>,
    config: &EngineConfig,
) -> Result<Analysis, EngineError> {
    config.validate()?;

    let snapshot = compute_indicators(series, &config.indicators)?;
    let technical = generate_signals(&snapshot, series, &config.signals);
    let levels = detect_levels(series, &config.levels)?;
    let valuation = value_stock(inputs, benchmark, weights, &config.valuation)?;

    let mut recommendation = recommend(
        technical.rating,
        valuation.verdict,
        valuation.upside_pct,
        &config.recommendation,
    );
    recommendation.fair_value = Some(valuation.blended.value);
    recommendation.support_resistance = levels.clone();
    recommendation.signals = technical.signals.clone();

    tracing::info!(
        bars = series.len(),
        technical = %technical.rating,
        valuation = ?valuation.verdict,
        action = %recommendation.action,
        confidence = recommendation.confidence,
        "analysis complete"
    );

    Ok(Analysis {
        snapshot,
        technical,
        levels,
        valuation,
        recommendation,
    })
}

/// Run the full pipeline for one stock.
pub fn analyze(
    series: &TimeSeries,
    inputs: &ValuationInputs,
    benchmark: &IndustryBenchmark,
    weights: Option<&BTreeMap<ValuationMethod, f64>>,
    config: &EngineConfig,
) -> Result<RecommendationResult, EngineError> {
    analyze_detailed(series, inputs, benchmark, weights, config).map(|a| a.recommendation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;
    use crate::recommend::Action;
    use crate::signals::Rating;
    use crate::valuation::ValuationVerdict;

    fn flat_series() -> TimeSeries {
        TimeSeries::new(make_bars(&[100.0; 250])).unwrap()
    }

    #[test]
    fn flat_series_fair_stock_holds() {
        let inputs = ValuationInputs::new(100.0).with_eps(100.0 / 22.0);
        let result = analyze(
            &flat_series(),
            &inputs,
            &IndustryBenchmark::default(),
            None,
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(result.action, Action::Hold);
        assert_eq!(result.technical_rating, Rating::Neutral);
        assert_eq!(result.valuation_rating, ValuationVerdict::FairlyValued);
        assert_eq!(result.confidence, 0.0);
        assert!(result.fair_value.is_some());
        assert_eq!(result.signals.len(), 5);
        assert!(result.support_resistance.is_empty());
    }

    #[test]
    fn missing_fundamentals_propagate() {
        let err = analyze(
            &flat_series(),
            &ValuationInputs::new(100.0),
            &IndustryBenchmark::default(),
            None,
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, EngineError::InsufficientInputs);
    }

    #[test]
    fn invalid_config_is_rejected_first() {
        let mut config = EngineConfig::default();
        config.levels.radius = 0;
        let err = analyze(
            &flat_series(),
            &ValuationInputs::new(100.0).with_eps(5.0),
            &IndustryBenchmark::default(),
            None,
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn detailed_analysis_keeps_intermediates() {
        let inputs = ValuationInputs::new(100.0).with_eps(8.0);
        let analysis = analyze_detailed(
            &flat_series(),
            &inputs,
            &IndustryBenchmark::default(),
            None,
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(analysis.valuation.verdict, ValuationVerdict::Undervalued);
        assert_eq!(analysis.recommendation.signals, analysis.technical.signals);
        assert_eq!(analysis.snapshot.sma(200), Some(100.0));
    }
}
