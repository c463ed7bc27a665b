//! Cross-sectional momentum strategy engine.
//!
//! A run converts a price table and a lookback length into a schedule of
//! monthly rebalance events and the realized daily return series. The engine
//! is a pure function of its inputs: no I/O, no shared state.

use crate::domain::error::MomtraderError;
use crate::domain::momentum::momentum_row;
use crate::domain::prices::PriceTable;
use crate::domain::rebalance::{rebalance_rows, select_top_k, RebalanceEvent, WeightVector};
use crate::domain::returns::{ReturnPoint, ReturnSeries};

/// Strategy parameters, validated once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    lookback_days: usize,
    top_k: usize,
}

impl StrategyConfig {
    pub fn new(lookback_days: usize, top_k: usize) -> Result<Self, MomtraderError> {
        if lookback_days == 0 {
            return Err(MomtraderError::InsufficientData {
                what: "lookback days",
                have: 0,
                need: 1,
            });
        }
        if top_k == 0 {
            return Err(MomtraderError::InsufficientData {
                what: "assets to select",
                have: 0,
                need: 1,
            });
        }
        Ok(Self {
            lookback_days,
            top_k,
        })
    }

    pub fn lookback_days(&self) -> usize {
        self.lookback_days
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }
}

/// Output of one strategy run over one price table.
#[derive(Debug, Clone)]
pub struct StrategyRun {
    pub returns: ReturnSeries,
    pub rebalances: Vec<RebalanceEvent>,
}

impl StrategyRun {
    /// Weights in effect on the given table row: those fixed at the latest
    /// rebalance at or before the row.
    pub fn weights_at(&self, row: usize) -> Option<&WeightVector> {
        self.rebalances
            .iter()
            .take_while(|e| e.row <= row)
            .last()
            .map(|e| &e.weights)
    }
}

/// Run the momentum strategy over a price table.
///
/// 1. Momentum is defined from row `lookback_days` onward.
/// 2. Rebalance points are the month-end rows of the eligible range.
/// 3. At each rebalance the `top_k` assets by momentum get weight `1/top_k`
///    each; all others get zero. Ties resolve stably by table column order.
/// 4. Weights are held buy-and-hold between rebalances; the weights applied
///    on a day are those fixed at the latest rebalance at or before it.
/// 5. The return series covers every row strictly after the first rebalance
///    row: `r_t = Σ w_a · (p_t / p_{t-1} - 1)`.
///
/// Fails with `InsufficientData` when the table is shorter than
/// `lookback_days + 1` rows or has fewer than `top_k` assets, and with
/// `NonFinite` if any computed return is not a finite number.
pub fn run_strategy(
    table: &PriceTable,
    config: &StrategyConfig,
) -> Result<StrategyRun, MomtraderError> {
    let lookback = config.lookback_days();
    let top_k = config.top_k();

    if table.n_rows() < lookback + 1 {
        return Err(MomtraderError::InsufficientData {
            what: "price rows",
            have: table.n_rows(),
            need: lookback + 1,
        });
    }
    if table.n_assets() < top_k {
        return Err(MomtraderError::InsufficientData {
            what: "assets",
            have: table.n_assets(),
            need: top_k,
        });
    }

    let mut rebalances = Vec::new();
    for row in rebalance_rows(table, lookback) {
        // momentum_row is Some for every row >= lookback
        let scores = momentum_row(table, row, lookback).ok_or(MomtraderError::NonFinite {
            what: "momentum score",
            date: table.date(row),
        })?;
        let selected = select_top_k(&scores, top_k)?;
        let weights = WeightVector::equal_weight(table.n_assets(), &selected);
        rebalances.push(RebalanceEvent {
            date: table.date(row),
            row,
            selected,
            weights,
        });
    }

    // Guaranteed non-empty: row n-1 is eligible and ends its month.
    let first = rebalances[0].row;

    let mut points = Vec::with_capacity(table.n_rows() - first - 1);
    let mut next_event = 1;
    let mut held = &rebalances[0].weights;
    for row in first + 1..table.n_rows() {
        if next_event < rebalances.len() && rebalances[next_event].row <= row {
            held = &rebalances[next_event].weights;
            next_event += 1;
        }
        let value: f64 = (0..table.n_assets())
            .map(|a| held.get(a) * table.daily_return(row, a))
            .sum();
        if !value.is_finite() {
            return Err(MomtraderError::NonFinite {
                what: "portfolio return",
                date: table.date(row),
            });
        }
        points.push(ReturnPoint {
            date: table.date(row),
            value,
        });
    }

    Ok(StrategyRun {
        returns: ReturnSeries::new(points),
        rebalances,
    })
}
