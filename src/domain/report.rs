//! Result records for downstream consumers.
//!
//! [`StrategyAnalysis`] is the flat record handed to the narrative layer; its
//! field names and nesting are a stable contract because the consumer embeds
//! the serialized document verbatim into a text prompt. The monthly summary
//! mirrors the breakdown the CLI prints per calendar month.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::metrics::Metrics;
use crate::domain::prices::PriceTable;
use crate::domain::strategy::StrategyRun;

/// Serializable per-lookback result for the narrative layer.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyAnalysis {
    pub lookback_period_days: u32,
    pub metrics: MetricsSummary,
    pub metadata: StrategyMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub total_return: f64,
    pub cagr: f64,
    pub volatility: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyMetadata {
    pub rebalance_frequency: String,
    pub asset_selection: String,
}

impl StrategyAnalysis {
    pub fn new(lookback_days: usize, top_k: usize, metrics: &Metrics) -> Self {
        StrategyAnalysis {
            lookback_period_days: lookback_days as u32,
            metrics: MetricsSummary {
                total_return: metrics.total_return,
                cagr: metrics.cagr,
                volatility: metrics.volatility,
                max_drawdown: metrics.max_drawdown,
                sharpe_ratio: metrics.sharpe_ratio,
                sortino_ratio: metrics.sortino_ratio,
            },
            metadata: StrategyMetadata {
                rebalance_frequency: "monthly".to_string(),
                asset_selection: format!("top_{}_equal_weight", top_k),
            },
        }
    }
}

/// One calendar month of realized performance.
#[derive(Debug, Clone)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub last_date: NaiveDate,
    pub end_wealth: f64,
    pub monthly_return: f64,
    /// (asset name, weight) pairs held at month end, zero weights omitted.
    pub holdings: Vec<(String, f64)>,
}

/// Group the realized wealth curve by calendar month, reporting end-of-month
/// wealth, the month's return, and the weights in effect at month end.
pub fn monthly_summary(table: &PriceTable, run: &StrategyRun) -> Vec<MonthlySummary> {
    let points = run.returns.points();
    let wealth = run.returns.wealth_curve();
    if points.is_empty() {
        return Vec::new();
    }

    // The return series starts one row after the first rebalance row.
    let first_row = run.rebalances[0].row + 1;

    let mut months: Vec<MonthlySummary> = Vec::new();
    let mut prev_end = 1.0;
    for (i, point) in points.iter().enumerate() {
        let key = (point.date.year(), point.date.month());
        let last_in_month =
            i + 1 == points.len() || (points[i + 1].date.year(), points[i + 1].date.month()) != key;
        if !last_in_month {
            continue;
        }

        let holdings = match run.weights_at(first_row + i) {
            Some(w) => table
                .assets()
                .iter()
                .enumerate()
                .filter(|(a, _)| w.get(*a) > 0.0)
                .map(|(a, name)| (name.clone(), w.get(a)))
                .collect(),
            None => Vec::new(),
        };

        months.push(MonthlySummary {
            year: key.0,
            month: key.1,
            last_date: point.date,
            end_wealth: wealth[i],
            monthly_return: wealth[i] / prev_end - 1.0,
            holdings,
        });
        prev_end = wealth[i];
    }
    months
}
