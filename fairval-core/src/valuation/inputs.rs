//! Fundamental inputs for one stock.

use serde::{Deserialize, Serialize};

/// Per-share fundamentals and ratios. Only `current_price` is required.
///
/// Ratios such as `roe`, `roce` and `earnings_growth_rate` are percent numbers
/// (15.0 means 15 %).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationInputs {
    pub current_price: f64,
    #[serde(default)]
    pub eps: Option<f64>,
    #[serde(default)]
    pub book_value_per_share: Option<f64>,
    #[serde(default)]
    pub sales_per_share: Option<f64>,
    #[serde(default)]
    pub ebitda: Option<f64>,
    #[serde(default)]
    pub enterprise_value: Option<f64>,
    #[serde(default)]
    pub earnings_growth_rate: Option<f64>,
    #[serde(default)]
    pub roe: Option<f64>,
    #[serde(default)]
    pub roce: Option<f64>,
    /// Enables the share-count EV/EBITDA path together with `net_debt`.
    #[serde(default)]
    pub shares_outstanding: Option<f64>,
    #[serde(default)]
    pub net_debt: Option<f64>,
}

impl ValuationInputs {
    pub fn new(current_price: f64) -> Self {
        Self {
            current_price,
            eps: None,
            book_value_per_share: None,
            sales_per_share: None,
            ebitda: None,
            enterprise_value: None,
            earnings_growth_rate: None,
            roe: None,
            roce: None,
            shares_outstanding: None,
            net_debt: None,
        }
    }

    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = Some(eps);
        self
    }

    pub fn with_book_value_per_share(mut self, bvps: f64) -> Self {
        self.book_value_per_share = Some(bvps);
        self
    }

    pub fn with_sales_per_share(mut self, sps: f64) -> Self {
        self.sales_per_share = Some(sps);
        self
    }

    pub fn with_ebitda(mut self, ebitda: f64) -> Self {
        self.ebitda = Some(ebitda);
        self
    }

    pub fn with_enterprise_value(mut self, ev: f64) -> Self {
        self.enterprise_value = Some(ev);
        self
    }

    pub fn with_earnings_growth_rate(mut self, growth_pct: f64) -> Self {
        self.earnings_growth_rate = Some(growth_pct);
        self
    }

    pub fn with_returns(mut self, roe: f64, roce: f64) -> Self {
        self.roe = Some(roe);
        self.roce = Some(roce);
        self
    }

    pub fn with_capital_structure(mut self, shares_outstanding: f64, net_debt: f64) -> Self {
        self.shares_outstanding = Some(shares_outstanding);
        self.net_debt = Some(net_debt);
        self
    }
}

/// The value when present, finite and strictly positive.
pub(crate) fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_filters_unusable_values() {
        assert_eq!(positive(Some(2.0)), Some(2.0));
        assert_eq!(positive(Some(0.0)), None);
        assert_eq!(positive(Some(-1.0)), None);
        assert_eq!(positive(Some(f64::NAN)), None);
        assert_eq!(positive(None), None);
    }

    #[test]
    fn deserializes_with_only_price() {
        let inputs: ValuationInputs = serde_json::from_str(r#"{"current_price": 100.0}"#).unwrap();
        assert_eq!(inputs, ValuationInputs::new(100.0));
    }
}
