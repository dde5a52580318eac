//! Industry benchmark multiples and the comparison of a stock against them.

use serde::{Deserialize, Serialize};

use super::inputs::{positive, ValuationInputs};

/// Benchmark multiples and return ratios (percent) for an industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryBenchmark {
    pub pe_ratio: f64,
    pub pb_ratio: f64,
    pub ps_ratio: f64,
    pub peg_ratio: f64,
    pub ev_ebitda: f64,
    pub roe: f64,
    pub roce: f64,
}

/// Large-cap market averages.
impl Default for IndustryBenchmark {
    fn default() -> Self {
        Self {
            pe_ratio: 22.0,
            pb_ratio: 3.5,
            ps_ratio: 2.8,
            peg_ratio: 1.5,
            ev_ebitda: 15.0,
            roe: 15.0,
            roce: 18.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    It,
    Banking,
    Fmcg,
    Pharma,
    Auto,
    Infrastructure,
    Metals,
    OilAndGas,
    Telecom,
}

impl Sector {
    pub const ALL: [Sector; 9] = [
        Sector::It,
        Sector::Banking,
        Sector::Fmcg,
        Sector::Pharma,
        Sector::Auto,
        Sector::Infrastructure,
        Sector::Metals,
        Sector::OilAndGas,
        Sector::Telecom,
    ];
}

impl IndustryBenchmark {
    /// Preset for a sector; fields without a sector figure keep the market default.
    pub fn for_sector(sector: Sector) -> Self {
        let base = Self::default();
        let (pe_ratio, pb_ratio, roe, roce) = match sector {
            Sector::It => (30.0, 7.5, 25.0, 30.0),
            Sector::Banking => (16.0, 2.25, 15.0, 12.0),
            Sector::Fmcg => (65.0, 15.0, 35.0, 40.0),
            Sector::Pharma => (30.0, 5.5, 18.0, 20.0),
            Sector::Auto => (22.5, 3.5, 15.0, 18.0),
            Sector::Infrastructure => (20.0, 3.0, 12.0, 14.0),
            Sector::Metals => (11.5, 1.75, 12.0, 15.0),
            Sector::OilAndGas => (14.0, 2.25, 15.0, 18.0),
            Sector::Telecom => (45.0, 3.5, base.roe, base.roce),
        };
        Self {
            pe_ratio,
            pb_ratio,
            roe,
            roce,
            ..base
        }
    }
}

/// Where a valuation multiple sits relative to the benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultipleStanding {
    Cheap,
    InLine,
    Expensive,
}

/// Where a return ratio sits relative to the benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnStanding {
    SignificantlyAbove,
    Above,
    InLine,
    Below,
    SignificantlyBelow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleComparison {
    pub metric: String,
    pub value: f64,
    pub benchmark: f64,
    pub standing: MultipleStanding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnComparison {
    pub metric: String,
    pub value: f64,
    pub benchmark: f64,
    /// (value - benchmark) / benchmark * 100
    pub diff_pct: f64,
    pub standing: ReturnStanding,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndustryComparison {
    pub multiples: Vec<MultipleComparison>,
    pub returns: Vec<ReturnComparison>,
}

/// Compare the stock's derived multiples and return ratios with the benchmark.
///
/// Metrics whose inputs are missing or non-positive are skipped.
pub fn compare_to_industry(
    inputs: &ValuationInputs,
    benchmark: &IndustryBenchmark,
) -> IndustryComparison {
    let price = inputs.current_price;
    let pe = positive(inputs.eps).map(|eps| price / eps);
    let pb = positive(inputs.book_value_per_share).map(|bvps| price / bvps);
    let ps = positive(inputs.sales_per_share).map(|sps| price / sps);
    let peg = pe.zip(positive(inputs.earnings_growth_rate)).map(|(pe, g)| pe / g);
    let ev_ebitda = positive(inputs.enterprise_value)
        .zip(positive(inputs.ebitda))
        .map(|(ev, ebitda)| ev / ebitda);

    let multiples = [
        ("pe_ratio", pe, benchmark.pe_ratio),
        ("pb_ratio", pb, benchmark.pb_ratio),
        ("ps_ratio", ps, benchmark.ps_ratio),
        ("peg_ratio", peg, benchmark.peg_ratio),
        ("ev_ebitda", ev_ebitda, benchmark.ev_ebitda),
    ]
    .into_iter()
    .filter_map(|(metric, value, bench)| {
        let value = value?;
        let standing = if value < bench * 0.8 {
            MultipleStanding::Cheap
        } else if value > bench * 1.2 {
            MultipleStanding::Expensive
        } else {
            MultipleStanding::InLine
        };
        Some(MultipleComparison {
            metric: metric.to_string(),
            value,
            benchmark: bench,
            standing,
        })
    })
    .collect();

    let returns = [
        ("roe", inputs.roe, benchmark.roe),
        ("roce", inputs.roce, benchmark.roce),
    ]
    .into_iter()
    .filter_map(|(metric, value, bench)| {
        let value = value.filter(|v| v.is_finite())?;
        if bench <= 0.0 {
            return None;
        }
        let diff_pct = (value - bench) / bench * 100.0;
        let standing = if diff_pct > 20.0 {
            ReturnStanding::SignificantlyAbove
        } else if diff_pct > 5.0 {
            ReturnStanding::Above
        } else if diff_pct > -5.0 {
            ReturnStanding::InLine
        } else if diff_pct > -20.0 {
            ReturnStanding::Below
        } else {
            ReturnStanding::SignificantlyBelow
        };
        Some(ReturnComparison {
            metric: metric.to_string(),
            value,
            benchmark: bench,
            diff_pct,
            standing,
        })
    })
    .collect();

    IndustryComparison { multiples, returns }
}
