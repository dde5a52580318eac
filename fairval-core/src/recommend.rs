//! Combine the technical rating and the valuation verdict into an action.

use serde::{Deserialize, Serialize};

use crate::config::{invalid_unless, ConfigError};
use crate::levels::SupportResistanceLevel;
use crate::signals::{Rating, SignalVote};
use crate::valuation::ValuationVerdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Buy,
    Hold,
    Sell,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Action::Buy => "BUY",
            Action::Hold => "HOLD",
            Action::Sell => "SELL",
        })
    }
}

/// How far past its verdict threshold the upside must be for a strong stance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationPolicy {
    /// |upside| in percent at which a directional verdict counts double.
    pub strong_stance_pct: f64,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            strong_stance_pct: 30.0,
        }
    }
}

impl RecommendationPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        invalid_unless(
            self.strong_stance_pct.is_finite() && self.strong_stance_pct > 0.0,
            "strong_stance_pct",
            "must be positive",
        )
    }

    /// Valuation stance in -2..=2. The sign always follows the verdict, so
    /// FairlyValued is 0 whatever the upside.
    pub fn stance(&self, verdict: ValuationVerdict, upside_pct: f64) -> i8 {
        match verdict {
            ValuationVerdict::FairlyValued => 0,
            ValuationVerdict::Undervalued if upside_pct >= self.strong_stance_pct => 2,
            ValuationVerdict::Undervalued => 1,
            ValuationVerdict::Overvalued if upside_pct <= -self.strong_stance_pct => -2,
            ValuationVerdict::Overvalued => -1,
        }
    }
}

/// The engine's final answer for one stock. Field names are the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub action: Action,
    pub confidence: f64,
    pub technical_rating: Rating,
    pub valuation_rating: ValuationVerdict,
    pub fair_value: Option<f64>,
    pub upside_potential_pct: f64,
    pub support_resistance: Vec<SupportResistanceLevel>,
    pub signals: Vec<SignalVote>,
}

/// Confidence in [0, 1] from the technical score and the valuation stance.
///
/// Agreeing signs count twice as much as disagreeing or neutral ones.
pub fn confidence(technical_score: i8, valuation_stance: i8) -> f64 {
    let magnitude = f64::from(technical_score.unsigned_abs() + valuation_stance.unsigned_abs());
    let agree = technical_score != 0 && technical_score.signum() == valuation_stance.signum();
    let divisor = if agree { 4.0 } else { 8.0 };
    (magnitude / divisor).clamp(0.0, 1.0)
}

pub fn recommend(
    technical_rating: Rating,
    valuation_rating: ValuationVerdict,
    upside_pct: f64,
    policy: &RecommendationPolicy,
) -> RecommendationResult {
    let action = match valuation_rating {
        ValuationVerdict::Undervalued if technical_rating.is_bullish() => Action::Buy,
        ValuationVerdict::Overvalued if technical_rating.is_bearish() => Action::Sell,
        _ => Action::Hold,
    };
    let stance = policy.stance(valuation_rating, upside_pct);
    let confidence = confidence(technical_rating.score(), stance);

    RecommendationResult {
        action,
        confidence,
        technical_rating,
        valuation_rating,
        fair_value: None,
        upside_potential_pct: upside_pct,
        support_resistance: Vec::new(),
        signals: Vec::new(),
    }
}
