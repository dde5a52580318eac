//! Batch evaluation of independent stocks.
//!
//! Every case runs the full single-stock analysis on its own. A case that
//! fails is recorded with its error and never stops the others.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use fairval_core::{analyze, Action, EngineConfig, RecommendationResult};

use crate::case::StockCase;
use crate::fingerprint::{config_fingerprint, FingerprintError};

/// Current schema version of serialized batch reports.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Analyzed(RecommendationResult),
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseOutcome {
    pub symbol: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl CaseOutcome {
    pub fn recommendation(&self) -> Option<&RecommendationResult> {
        match &self.outcome {
            Outcome::Analyzed(result) => Some(result),
            Outcome::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub buy: usize,
    pub hold: usize,
    pub sell: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn tally(outcomes: &[CaseOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            match outcome.recommendation().map(|r| r.action) {
                Some(Action::Buy) => summary.buy += 1,
                Some(Action::Hold) => summary.hold += 1,
                Some(Action::Sell) => summary.sell += 1,
                None => summary.failed += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub config_fingerprint: String,
    pub generated_at: DateTime<Utc>,
    pub summary: BatchSummary,
    /// One entry per case, in input order.
    pub outcomes: Vec<CaseOutcome>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl BatchReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn outcome(&self, symbol: &str) -> Option<&CaseOutcome> {
        self.outcomes.iter().find(|o| o.symbol == symbol)
    }
}

/// Evaluates stock cases against one engine config, optionally in parallel.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    config: EngineConfig,
    parallel: bool,
}

impl BatchRunner {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            parallel: true,
        }
    }

    /// Enables or disables parallel execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate every case. Outcomes keep the order of `cases`.
    pub fn run(&self, cases: &[StockCase]) -> Result<BatchReport, FingerprintError> {
        let config_fingerprint = config_fingerprint(&self.config)?;
        tracing::info!(
            cases = cases.len(),
            parallel = self.parallel,
            config = %&config_fingerprint[..12],
            "batch started"
        );

        let outcomes: Vec<CaseOutcome> = if self.parallel {
            cases.par_iter().map(|case| self.evaluate(case)).collect()
        } else {
            cases.iter().map(|case| self.evaluate(case)).collect()
        };

        let summary = BatchSummary::tally(&outcomes);
        tracing::info!(
            buy = summary.buy,
            hold = summary.hold,
            sell = summary.sell,
            failed = summary.failed,
            "batch finished"
        );

        Ok(BatchReport {
            schema_version: SCHEMA_VERSION,
            config_fingerprint,
            generated_at: Utc::now(),
            summary,
            outcomes,
        })
    }

    fn evaluate(&self, case: &StockCase) -> CaseOutcome {
        let span = tracing::info_span!("stock", symbol = %case.symbol);
        let _guard = span.enter();

        let outcome = match analyze(
            &case.series,
            &case.inputs,
            &case.benchmark,
            case.weights.as_ref(),
            &self.config,
        ) {
            Ok(result) => Outcome::Analyzed(result),
            Err(e) => {
                tracing::warn!(error = %e, "stock analysis failed");
                Outcome::Failed {
                    error: e.to_string(),
                }
            }
        };
        CaseOutcome {
            symbol: case.symbol.clone(),
            outcome,
        }
    }
}
