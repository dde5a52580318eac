//! Multi-method fair value.
//!
//! Every registered method that can run on the inputs produces an estimate;
//! the estimates are blended by weight and the blend's upside against the
//! current price decides the verdict.

pub mod benchmark;
pub mod inputs;
pub mod methods;

pub use benchmark::{
    compare_to_industry, IndustryBenchmark, IndustryComparison, MultipleComparison,
    MultipleStanding, ReturnComparison, ReturnStanding, Sector,
};
pub use inputs::ValuationInputs;
pub use methods::{FairValueEstimate, Fidelity, ValuationMethod};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::config::{invalid_unless, ConfigError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    #[error("no valuation method could be applied to the supplied inputs")]
    InsufficientInputs,
    #[error("current price must be positive and finite, got {0}")]
    InvalidPrice(f64),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValuationVerdict {
    Undervalued,
    FairlyValued,
    Overvalued,
}

/// Upside thresholds, in percent, for the verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationPolicy {
    /// Upside strictly above this is Undervalued.
    pub undervalued_above_pct: f64,
    /// Upside strictly below this is Overvalued.
    pub overvalued_below_pct: f64,
}

impl Default for ValuationPolicy {
    fn default() -> Self {
        Self {
            undervalued_above_pct: 15.0,
            overvalued_below_pct: -15.0,
        }
    }
}

impl ValuationPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        invalid_unless(
            self.undervalued_above_pct.is_finite()
                && self.overvalued_below_pct.is_finite()
                && self.overvalued_below_pct <= self.undervalued_above_pct,
            "overvalued_below_pct",
            "thresholds must be finite with overvalued_below_pct <= undervalued_above_pct",
        )
    }

    pub fn verdict(&self, upside_pct: f64) -> ValuationVerdict {
        if upside_pct > self.undervalued_above_pct {
            ValuationVerdict::Undervalued
        } else if upside_pct < self.overvalued_below_pct {
            ValuationVerdict::Overvalued
        } else {
            ValuationVerdict::FairlyValued
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendedFairValue {
    pub value: f64,
    /// Methods with non-zero weight in the blend.
    pub contributing_methods: Vec<ValuationMethod>,
    pub method_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    pub current_price: f64,
    pub estimates: Vec<FairValueEstimate>,
    pub blended: BlendedFairValue,
    pub upside_pct: f64,
    pub verdict: ValuationVerdict,
    pub industry: IndustryComparison,
}

/// Value a stock with every applicable method and blend the results.
///
/// `weights` of `None` weighs the applicable methods equally. With a map,
/// methods missing from it weigh 0 and the weights are renormalized over the
/// applicable methods.
pub fn value_stock(
    inputs: &ValuationInputs,
    benchmark: &IndustryBenchmark,
    weights: Option<&BTreeMap<ValuationMethod, f64>>,
    policy: &ValuationPolicy,
) -> Result<ValuationReport, ValuationError> {
    let price = inputs.current_price;
    if !price.is_finite() || price <= 0.0 {
        return Err(ValuationError::InvalidPrice(price));
    }
    policy.validate()?;
    if let Some(weights) = weights {
        for (method, &weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    method: method.to_string(),
                    weight,
                }
                .into());
            }
        }
    }

    let mut computed = Vec::new();
    for method in ValuationMethod::ALL {
        match method.estimate(inputs, benchmark) {
            Some((value, fidelity)) => computed.push((method, value, fidelity)),
            None => tracing::debug!(method = %method, "valuation method excluded"),
        }
    }
    if computed.is_empty() {
        return Err(ValuationError::InsufficientInputs);
    }

    let mut raw: Vec<f64> = computed
        .iter()
        .map(|(method, _, _)| weights.map_or(1.0, |w| w.get(method).copied().unwrap_or(0.0)))
        .collect();
    // Scale by the largest weight first so huge finite weights cannot sum to inf.
    let largest = raw.iter().copied().fold(0.0, f64::max);
    if largest > 0.0 {
        raw.iter_mut().for_each(|w| *w /= largest);
    }
    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        let methods = computed
            .iter()
            .map(|(m, _, _)| m.name())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(ConfigError::NoWeightedMethod { methods }.into());
    }

    let estimates: Vec<FairValueEstimate> = computed
        .iter()
        .zip(&raw)
        .map(|(&(method, value, fidelity), &w)| FairValueEstimate {
            method,
            estimated_value: value,
            weight: w / total,
            fidelity,
            upside_pct: upside_pct(value, price),
        })
        .collect();

    let value = estimates
        .iter()
        .map(|e| e.estimated_value * e.weight)
        .sum::<f64>();
    let contributing_methods: Vec<ValuationMethod> = estimates
        .iter()
        .filter(|e| e.weight > 0.0)
        .map(|e| e.method)
        .collect();
    let blended = BlendedFairValue {
        value,
        method_count: contributing_methods.len(),
        contributing_methods,
    };

    let upside = upside_pct(value, price);
    let verdict = policy.verdict(upside);
    tracing::debug!(
        fair_value = value,
        upside_pct = upside,
        methods = blended.method_count,
        "stock valued"
    );

    Ok(ValuationReport {
        current_price: price,
        estimates,
        blended,
        upside_pct: upside,
        verdict,
        industry: compare_to_industry(inputs, benchmark),
    })
}

fn upside_pct(value: f64, price: f64) -> f64 {
    (value - price) / price * 100.0
}
