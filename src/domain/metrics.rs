//! Performance metrics over a daily return series.
//!
//! Conventions, fixed for reproducibility:
//! - Standard deviation is the population form (divide by n) everywhere.
//! - Annualized rates (`risk_free_rate`, `target_return`) convert to
//!   per-period rates by simple division by `periods_per_year`, not by
//!   compounding.
//! - Downside deviation measures squared shortfall from the per-period
//!   target, averaged over the full series length.
//! - Zero-denominator Sharpe/Sortino return the 0.0 sentinel rather than a
//!   floating-point infinity; total wipeout (total return ≤ −1) pins CAGR to
//!   −1.0. One policy, applied uniformly.

use crate::domain::error::MomtraderError;
use crate::domain::returns::ReturnSeries;

/// Annualization and rate parameters for metrics computation.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsConfig {
    pub risk_free_rate: f64,
    pub target_return: f64,
    pub periods_per_year: u32,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        MetricsConfig {
            risk_free_rate: 0.0,
            target_return: 0.0,
            periods_per_year: 252,
        }
    }
}

/// The six standard statistics for one strategy run.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub total_return: f64,
    pub cagr: f64,
    pub volatility: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
}

impl Metrics {
    /// Compute all six statistics from a non-empty return series.
    ///
    /// Fails with `EmptySeries` on a zero-length series; every other input
    /// produces a fully populated record using the documented sentinel
    /// conventions.
    pub fn compute(
        series: &ReturnSeries,
        config: &MetricsConfig,
    ) -> Result<Self, MomtraderError> {
        if series.is_empty() {
            return Err(MomtraderError::EmptySeries);
        }

        let n = series.len() as f64;
        let ppy = config.periods_per_year as f64;
        let sqrt_ppy = ppy.sqrt();

        let wealth = series.wealth_curve();
        let total_return = wealth[wealth.len() - 1] - 1.0;

        // Wipeout leaves no base to compound from; the series cannot recover
        // past zero wealth, so -1.0 is the fixed convention.
        let cagr = if total_return <= -1.0 {
            -1.0
        } else {
            (1.0 + total_return).powf(ppy / n) - 1.0
        };

        let mean = series.values().sum::<f64>() / n;
        let variance = series.values().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
        let stddev = variance.sqrt();
        let volatility = stddev * sqrt_ppy;

        let max_drawdown = compute_drawdown(&wealth);

        let rf_per_period = config.risk_free_rate / ppy;
        let excess = mean - rf_per_period;
        let sharpe_ratio = if stddev > 0.0 {
            excess / stddev * sqrt_ppy
        } else {
            0.0
        };

        let target_per_period = config.target_return / ppy;
        let downside_variance = series
            .values()
            .filter(|&r| r < target_per_period)
            .map(|r| (r - target_per_period).powi(2))
            .sum::<f64>()
            / n;
        let downside_stddev = downside_variance.sqrt();
        let sortino_ratio = if downside_stddev > 0.0 {
            excess / downside_stddev * sqrt_ppy
        } else {
            0.0
        };

        Ok(Metrics {
            total_return,
            cagr,
            volatility,
            max_drawdown,
            sharpe_ratio,
            sortino_ratio,
        })
    }
}

/// Worst peak-to-trough decline of the wealth curve: min(w_t / peak_t - 1),
/// never positive.
fn compute_drawdown(wealth: &[f64]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0_f64;
    for &w in wealth {
        if w > peak {
            peak = w;
        }
        let dd = w / peak - 1.0;
        if dd < max_dd {
            max_dd = dd;
        }
    }
    max_dd
}
