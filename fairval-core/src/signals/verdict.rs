//! Per-indicator verdicts and the aggregate technical rating.

use serde::{Deserialize, Serialize};

/// One indicator's reading of the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Bullish,
    Bearish,
    Neutral,
    /// Price and volume disagree; counted as Neutral when aggregating.
    NeutralCautious,
}

impl Verdict {
    pub fn is_neutral(&self) -> bool {
        matches!(self, Verdict::Neutral | Verdict::NeutralCautious)
    }
}

/// Aggregate technical rating, ordered from most bearish to most bullish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    StronglyBearish,
    Bearish,
    Neutral,
    Bullish,
    StronglyBullish,
}

impl Rating {
    /// Signed score in -2..=2.
    pub fn score(&self) -> i8 {
        match self {
            Rating::StronglyBearish => -2,
            Rating::Bearish => -1,
            Rating::Neutral => 0,
            Rating::Bullish => 1,
            Rating::StronglyBullish => 2,
        }
    }

    pub fn is_bullish(&self) -> bool {
        *self >= Rating::Bullish
    }

    pub fn is_bearish(&self) -> bool {
        *self <= Rating::Bearish
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Rating::StronglyBearish => "Strongly Bearish",
            Rating::Bearish => "Bearish",
            Rating::Neutral => "Neutral",
            Rating::Bullish => "Bullish",
            Rating::StronglyBullish => "Strongly Bullish",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_are_ordered() {
        assert!(Rating::StronglyBearish < Rating::Bearish);
        assert!(Rating::Bearish < Rating::Neutral);
        assert!(Rating::Neutral < Rating::Bullish);
        assert!(Rating::Bullish < Rating::StronglyBullish);
    }

    #[test]
    fn score_matches_order() {
        let all = [
            Rating::StronglyBearish,
            Rating::Bearish,
            Rating::Neutral,
            Rating::Bullish,
            Rating::StronglyBullish,
        ];
        let scores: Vec<i8> = all.iter().map(Rating::score).collect();
        assert_eq!(scores, vec![-2, -1, 0, 1, 2]);
        assert!(Rating::StronglyBullish.is_bullish());
        assert!(!Rating::Neutral.is_bullish());
        assert!(!Rating::Neutral.is_bearish());
    }

    #[test]
    fn cautious_counts_as_neutral() {
        assert!(Verdict::NeutralCautious.is_neutral());
        assert!(!Verdict::Bullish.is_neutral());
    }
}
