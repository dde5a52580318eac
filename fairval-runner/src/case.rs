//! One stock to evaluate, and loaders for case and config files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use fairval_core::{EngineConfig, IndustryBenchmark, TimeSeries, ValuationInputs, ValuationMethod};

/// Everything the engine needs for one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockCase {
    pub symbol: String,
    pub series: TimeSeries,
    pub inputs: ValuationInputs,
    #[serde(default)]
    pub benchmark: IndustryBenchmark,
    /// Blend weights; `None` weighs the applicable methods equally.
    #[serde(default)]
    pub weights: Option<BTreeMap<ValuationMethod, f64>>,
}

impl StockCase {
    pub fn new(symbol: impl Into<String>, series: TimeSeries, inputs: ValuationInputs) -> Self {
        Self {
            symbol: symbol.into(),
            series,
            inputs,
            benchmark: IndustryBenchmark::default(),
            weights: None,
        }
    }

    pub fn with_benchmark(mut self, benchmark: IndustryBenchmark) -> Self {
        self.benchmark = benchmark;
        self
    }

    pub fn with_weights(mut self, weights: BTreeMap<ValuationMethod, f64>) -> Self {
        self.weights = Some(weights);
        self
    }
}

/// Load a JSON array of cases. Bars are validated while deserializing.
pub fn load_cases(path: &Path) -> Result<Vec<StockCase>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading cases from {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing cases in {}", path.display()))
}

/// Load and validate an engine config from TOML.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    EngineConfig::from_file(path).with_context(|| format!("loading config {}", path.display()))
}
