//! Support and resistance levels from local extrema of the close.
//!
//! Bar i of the scanned window is a local maximum when its close is strictly
//! above every close in the `radius` bars before it and at least every close
//! in the `radius` bars after it, so a plateau yields a single extremum.
//! Minima mirror this. Maxima cluster into resistance, minima into support.

use serde::{Deserialize, Serialize};

use crate::config::{invalid_unless, ConfigError};
use crate::domain::TimeSeries;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelParams {
    /// Trailing bars scanned; the whole series when shorter.
    pub window: usize,
    /// Neighbours on each side an extremum must dominate.
    pub radius: usize,
    /// Cluster tolerance as a percentage of the current close.
    pub tolerance_pct: f64,
    pub max_per_side: usize,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            window: 90,
            radius: 5,
            tolerance_pct: 1.0,
            max_per_side: 3,
        }
    }
}

impl LevelParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        invalid_unless(self.window >= 1, "window", "must be >= 1")?;
        invalid_unless(self.radius >= 1, "radius", "must be >= 1")?;
        invalid_unless(self.max_per_side >= 1, "max_per_side", "must be >= 1")?;
        invalid_unless(
            self.tolerance_pct.is_finite() && self.tolerance_pct > 0.0,
            "tolerance_pct",
            "must be a positive percentage",
        )?;
        if self.window < 2 * self.radius + 1 {
            return Err(ConfigError::invalid(
                "window",
                format!("must cover at least 2 * radius + 1 = {} bars", 2 * self.radius + 1),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelKind {
    Support,
    Resistance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportResistanceLevel {
    pub price: f64,
    pub kind: LevelKind,
    /// Number of extrema merged into the level.
    pub strength: usize,
}

/// Detect the strongest nearby levels, sorted by distance from the last close.
pub fn detect_levels(
    series: &TimeSeries,
    params: &LevelParams,
) -> Result<Vec<SupportResistanceLevel>, ConfigError> {
    params.validate()?;

    let closes = series.closes();
    let current = series.last_close();
    let window = &closes[closes.len().saturating_sub(params.window)..];
    let r = params.radius;

    let mut maxima = Vec::new();
    let mut minima = Vec::new();
    if window.len() >= 2 * r + 1 {
        for i in r..window.len() - r {
            let c = window[i];
            let before = &window[i - r..i];
            let after = &window[i + 1..=i + r];
            if before.iter().all(|&b| c > b) && after.iter().all(|&a| c >= a) {
                maxima.push(c);
            } else if before.iter().all(|&b| c < b) && after.iter().all(|&a| c <= a) {
                minima.push(c);
            }
        }
    }

    let tolerance = params.tolerance_pct / 100.0 * current;
    let mut levels = nearest(
        cluster(minima, tolerance, LevelKind::Support),
        current,
        params.max_per_side,
    );
    levels.extend(nearest(
        cluster(maxima, tolerance, LevelKind::Resistance),
        current,
        params.max_per_side,
    ));
    sort_by_proximity(&mut levels, current);

    tracing::debug!(count = levels.len(), "support/resistance levels detected");
    Ok(levels)
}

/// Greedy clustering of sorted prices around a running mean.
fn cluster(mut prices: Vec<f64>, tolerance: f64, kind: LevelKind) -> Vec<SupportResistanceLevel> {
    prices.sort_by(|a, b| a.total_cmp(b));

    let mut levels = Vec::new();
    let mut sum = 0.0;
    let mut count = 0usize;
    for price in prices {
        if count > 0 && (price - sum / count as f64).abs() > tolerance {
            levels.push(SupportResistanceLevel {
                price: sum / count as f64,
                kind,
                strength: count,
            });
            sum = 0.0;
            count = 0;
        }
        sum += price;
        count += 1;
    }
    if count > 0 {
        levels.push(SupportResistanceLevel {
            price: sum / count as f64,
            kind,
            strength: count,
        });
    }
    levels
}

fn nearest(
    mut levels: Vec<SupportResistanceLevel>,
    current: f64,
    keep: usize,
) -> Vec<SupportResistanceLevel> {
    sort_by_proximity(&mut levels, current);
    levels.truncate(keep);
    levels
}

fn sort_by_proximity(levels: &mut [SupportResistanceLevel], current: f64) {
    levels.sort_by(|a, b| {
        (a.price - current)
            .abs()
            .total_cmp(&(b.price - current).abs())
            .then(a.price.total_cmp(&b.price))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    fn series(closes: &[f64]) -> TimeSeries {
        TimeSeries::new(make_bars(closes)).unwrap()
    }

    fn params(radius: usize) -> LevelParams {
        LevelParams {
            radius,
            ..Default::default()
        }
    }

    #[test]
    fn two_troughs_merge_into_one_support() {
        let closes = [
            10.0, 9.0, 8.0, 7.0, 8.0, 9.0, 10.0, 11.0, 10.0, 9.0, 8.0, 7.0, 8.0, 9.0, 10.0,
        ];
        let levels = detect_levels(&series(&closes), &params(2)).unwrap();

        let support: Vec<_> = levels.iter().filter(|l| l.kind == LevelKind::Support).collect();
        assert_eq!(support.len(), 1);
        assert_approx(support[0].price, 7.0, DEFAULT_EPSILON);
        assert_eq!(support[0].strength, 2);

        let resistance: Vec<_> = levels.iter().filter(|l| l.kind == LevelKind::Resistance).collect();
        assert_eq!(resistance.len(), 1);
        assert_approx(resistance[0].price, 11.0, DEFAULT_EPSILON);
        assert_eq!(resistance[0].strength, 1);
    }

    #[test]
    fn plateau_yields_single_extremum() {
        let closes = [5.0, 4.0, 3.0, 3.0, 4.0, 5.0, 6.0];
        let levels = detect_levels(&series(&closes), &params(2)).unwrap();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].kind, LevelKind::Support);
        assert_eq!(levels[0].strength, 1);
    }

    #[test]
    fn separate_troughs_stay_separate() {
        // Troughs at 50 and 60 are 10 apart, far beyond 1% of the last close.
        let closes = [
            70.0, 65.0, 50.0, 65.0, 70.0, 75.0, 70.0, 65.0, 60.0, 65.0, 70.0, 72.0,
        ];
        let levels = detect_levels(&series(&closes), &params(2)).unwrap();
        let supports: Vec<f64> = levels
            .iter()
            .filter(|l| l.kind == LevelKind::Support)
            .map(|l| l.price)
            .collect();
        // Nearest to the close of 72 first.
        assert_eq!(supports, vec![60.0, 50.0]);
    }

    #[test]
    fn keeps_nearest_per_side_and_sorts_by_proximity() {
        let mut closes = Vec::new();
        for trough in [40.0, 60.0, 80.0, 90.0] {
            closes.extend_from_slice(&[100.0, 100.5, trough, 100.5, 100.0]);
        }
        closes.push(100.0);
        let p = LevelParams {
            radius: 2,
            max_per_side: 2,
            ..Default::default()
        };
        let levels = detect_levels(&series(&closes), &p).unwrap();
        let supports: Vec<f64> = levels
            .iter()
            .filter(|l| l.kind == LevelKind::Support)
            .map(|l| l.price)
            .collect();
        assert_eq!(supports, vec![90.0, 80.0]);

        let distances: Vec<f64> = levels.iter().map(|l| (l.price - 100.0).abs()).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn only_trailing_window_is_scanned() {
        let mut closes = vec![100.0, 90.0, 50.0, 90.0, 100.0];
        closes.extend(std::iter::repeat(100.0).take(20));
        let p = LevelParams {
            window: 10,
            radius: 2,
            ..Default::default()
        };
        assert!(detect_levels(&series(&closes), &p).unwrap().is_empty());
    }

    #[test]
    fn short_series_has_no_levels() {
        let levels = detect_levels(&series(&[10.0, 9.0, 10.0]), &LevelParams::default()).unwrap();
        assert!(levels.is_empty());
    }

    #[test]
    fn invalid_params_are_config_errors() {
        let s = series(&[10.0; 20]);
        for p in [
            LevelParams { window: 0, ..Default::default() },
            LevelParams { radius: 0, ..Default::default() },
            LevelParams { max_per_side: 0, ..Default::default() },
            LevelParams { tolerance_pct: 0.0, ..Default::default() },
            LevelParams { tolerance_pct: f64::NAN, ..Default::default() },
            LevelParams { window: 10, radius: 5, ..Default::default() },
        ] {
            assert!(detect_levels(&s, &p).is_err(), "{p:?}");
        }
    }
}
