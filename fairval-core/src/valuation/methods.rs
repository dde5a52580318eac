//! Registry of fair-value methods.
//!
//! Each method is a pure function of the inputs and the benchmark, tagged with
//! the inputs it needs. A method yields no estimate when an input is missing or
//! non-positive, or when the computed value is itself non-positive.

use serde::{Deserialize, Serialize};

use super::benchmark::IndustryBenchmark;
use super::inputs::{positive, ValuationInputs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationMethod {
    PriceToEarnings,
    PriceToBook,
    PriceToSales,
    Peg,
    EvEbitda,
}

/// How faithfully a method could be applied to the supplied inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fidelity {
    Full,
    /// Per-share figures were inferred from enterprise value and price.
    Approximate,
}

type Estimator = fn(&ValuationInputs, &IndustryBenchmark) -> Option<(f64, Fidelity)>;

impl ValuationMethod {
    pub const ALL: [ValuationMethod; 5] = [
        ValuationMethod::PriceToEarnings,
        ValuationMethod::PriceToBook,
        ValuationMethod::PriceToSales,
        ValuationMethod::Peg,
        ValuationMethod::EvEbitda,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ValuationMethod::PriceToEarnings => "pe",
            ValuationMethod::PriceToBook => "pb",
            ValuationMethod::PriceToSales => "ps",
            ValuationMethod::Peg => "peg",
            ValuationMethod::EvEbitda => "ev_ebitda",
        }
    }

    /// Inputs the method reads. EV/EBITDA needs `ebitda` plus either
    /// `shares_outstanding` or `enterprise_value`.
    pub fn required_inputs(&self) -> &'static [&'static str] {
        match self {
            ValuationMethod::PriceToEarnings => &["eps"],
            ValuationMethod::PriceToBook => &["book_value_per_share"],
            ValuationMethod::PriceToSales => &["sales_per_share"],
            ValuationMethod::Peg => &["eps", "earnings_growth_rate"],
            ValuationMethod::EvEbitda => &["ebitda", "shares_outstanding|enterprise_value"],
        }
    }

    fn estimator(&self) -> Estimator {
        match self {
            ValuationMethod::PriceToEarnings => pe,
            ValuationMethod::PriceToBook => pb,
            ValuationMethod::PriceToSales => ps,
            ValuationMethod::Peg => peg,
            ValuationMethod::EvEbitda => ev_ebitda,
        }
    }

    /// Fair value per share, or `None` when the method does not apply.
    pub fn estimate(
        &self,
        inputs: &ValuationInputs,
        benchmark: &IndustryBenchmark,
    ) -> Option<(f64, Fidelity)> {
        (self.estimator())(inputs, benchmark).filter(|(v, _)| v.is_finite() && *v > 0.0)
    }
}

impl std::fmt::Display for ValuationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn pe(inputs: &ValuationInputs, benchmark: &IndustryBenchmark) -> Option<(f64, Fidelity)> {
    let eps = positive(inputs.eps)?;
    Some((eps * benchmark.pe_ratio, Fidelity::Full))
}

fn pb(inputs: &ValuationInputs, benchmark: &IndustryBenchmark) -> Option<(f64, Fidelity)> {
    let bvps = positive(inputs.book_value_per_share)?;
    Some((bvps * benchmark.pb_ratio, Fidelity::Full))
}

fn ps(inputs: &ValuationInputs, benchmark: &IndustryBenchmark) -> Option<(f64, Fidelity)> {
    let sps = positive(inputs.sales_per_share)?;
    Some((sps * benchmark.ps_ratio, Fidelity::Full))
}

/// Fair P/E = PEG × growth (growth as a percent number).
fn peg(inputs: &ValuationInputs, benchmark: &IndustryBenchmark) -> Option<(f64, Fidelity)> {
    let eps = positive(inputs.eps)?;
    let growth = positive(inputs.earnings_growth_rate)?;
    Some((eps * benchmark.peg_ratio * growth, Fidelity::Full))
}

fn ev_ebitda(inputs: &ValuationInputs, benchmark: &IndustryBenchmark) -> Option<(f64, Fidelity)> {
    let ebitda = positive(inputs.ebitda)?;
    if let Some(shares) = positive(inputs.shares_outstanding) {
        let equity = ebitda * benchmark.ev_ebitda - inputs.net_debt.unwrap_or(0.0);
        return Some((equity / shares, Fidelity::Full));
    }
    let ev = positive(inputs.enterprise_value)?;
    let price = positive(Some(inputs.current_price))?;
    let share_equivalents = ev / price;
    Some((ebitda / share_equivalents * benchmark.ev_ebitda, Fidelity::Approximate))
}

/// One method's fair value and its share of the blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairValueEstimate {
    pub method: ValuationMethod,
    pub estimated_value: f64,
    /// Normalized blend weight.
    pub weight: f64,
    pub fidelity: Fidelity,
    pub upside_pct: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    fn bench() -> IndustryBenchmark {
        IndustryBenchmark::default()
    }

    #[test]
    fn multiples_scale_per_share_figures() {
        let inputs = ValuationInputs::new(100.0)
            .with_eps(5.0)
            .with_book_value_per_share(20.0)
            .with_sales_per_share(40.0);
        let value = |m: ValuationMethod| m.estimate(&inputs, &bench()).unwrap().0;
        assert_approx(value(ValuationMethod::PriceToEarnings), 110.0, DEFAULT_EPSILON);
        assert_approx(value(ValuationMethod::PriceToBook), 70.0, DEFAULT_EPSILON);
        assert_approx(value(ValuationMethod::PriceToSales), 112.0, DEFAULT_EPSILON);
    }

    #[test]
    fn peg_uses_growth_as_percent() {
        let inputs = ValuationInputs::new(100.0)
            .with_eps(4.0)
            .with_earnings_growth_rate(12.0);
        let (value, fidelity) = ValuationMethod::Peg.estimate(&inputs, &bench()).unwrap();
        // fair P/E = 1.5 * 12 = 18
        assert_approx(value, 72.0, DEFAULT_EPSILON);
        assert_eq!(fidelity, Fidelity::Full);
    }

    #[test]
    fn ev_ebitda_with_share_count_is_full_fidelity() {
        let inputs = ValuationInputs::new(100.0)
            .with_ebitda(1_000.0)
            .with_capital_structure(100.0, 3_000.0);
        let (value, fidelity) = ValuationMethod::EvEbitda.estimate(&inputs, &bench()).unwrap();
        // (1000 * 15 - 3000) / 100
        assert_approx(value, 120.0, DEFAULT_EPSILON);
        assert_eq!(fidelity, Fidelity::Full);
    }

    #[test]
    fn ev_ebitda_without_share_count_is_approximate() {
        let inputs = ValuationInputs::new(50.0)
            .with_ebitda(200.0)
            .with_enterprise_value(2_500.0);
        let (value, fidelity) = ValuationMethod::EvEbitda.estimate(&inputs, &bench()).unwrap();
        // 50 share-equivalents, EBITDA/share 4, times 15
        assert_approx(value, 60.0, DEFAULT_EPSILON);
        assert_eq!(fidelity, Fidelity::Approximate);
    }

    #[test]
    fn unusable_inputs_exclude_method() {
        let inputs = ValuationInputs::new(100.0)
            .with_eps(-2.0)
            .with_book_value_per_share(0.0)
            .with_earnings_growth_rate(10.0)
            .with_ebitda(100.0);
        for method in ValuationMethod::ALL {
            assert!(method.estimate(&inputs, &bench()).is_none(), "{method}");
        }
    }

    #[test]
    fn non_positive_result_is_excluded() {
        // Net debt larger than the implied enterprise value.
        let inputs = ValuationInputs::new(100.0)
            .with_ebitda(10.0)
            .with_capital_structure(10.0, 500.0);
        assert!(ValuationMethod::EvEbitda.estimate(&inputs, &bench()).is_none());
    }

    #[test]
    fn registry_lists_every_method_once() {
        let mut names: Vec<&str> = ValuationMethod::ALL.iter().map(|m| m.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ValuationMethod::ALL.len());
        assert!(ValuationMethod::ALL.iter().all(|m| !m.required_inputs().is_empty()));
    }
}
