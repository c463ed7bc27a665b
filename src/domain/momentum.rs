//! Lookback-window momentum scoring.
//!
//! Momentum at row `i` is the relative price change over the previous
//! `lookback` table rows: `price[i] / price[i - lookback] - 1`. The lookback
//! counts trading days (rows), not calendar days. Rows with `i < lookback`
//! have no score and are excluded from rebalance eligibility.

use crate::domain::prices::PriceTable;

/// Momentum score for one asset at one row, or `None` when the row has
/// insufficient history.
pub fn momentum_score(
    table: &PriceTable,
    row: usize,
    asset: usize,
    lookback: usize,
) -> Option<f64> {
    if row < lookback {
        return None;
    }
    Some(table.price(row, asset) / table.price(row - lookback, asset) - 1.0)
}

/// Momentum scores for every asset at one row, or `None` when the row has
/// insufficient history.
pub fn momentum_row(table: &PriceTable, row: usize, lookback: usize) -> Option<Vec<f64>> {
    if row < lookback {
        return None;
    }
    Some(
        (0..table.n_assets())
            .map(|a| table.price(row, a) / table.price(row - lookback, a) - 1.0)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prices::PriceRow;
    use chrono::NaiveDate;

    fn linear_table(n: usize) -> PriceTable {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rows = (0..n)
            .map(|i| PriceRow {
                date: start + chrono::Duration::days(i as i64),
                prices: vec![100.0 + i as f64],
            })
            .collect();
        PriceTable::new(vec!["GOLD".into()], rows).unwrap()
    }

    #[test]
    fn undefined_before_lookback() {
        let t = linear_table(40);
        assert!(momentum_score(&t, 29, 0, 30).is_none());
        assert!(momentum_row(&t, 0, 30).is_none());
    }

    #[test]
    fn defined_from_lookback_onward() {
        let t = linear_table(40);
        // price[30]/price[0] - 1 = 130/100 - 1
        let m = momentum_score(&t, 30, 0, 30).unwrap();
        assert!((m - 0.30).abs() < 1e-12);
    }

    #[test]
    fn linear_prices_exact_score() {
        let t = linear_table(100);
        // price[50]/price[20] - 1 = 150/120 - 1
        let m = momentum_score(&t, 50, 0, 30).unwrap();
        assert!((m - (150.0 / 120.0 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn constant_prices_zero_score() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rows = (0..50)
            .map(|i| PriceRow {
                date: start + chrono::Duration::days(i as i64),
                prices: vec![42.0, 7.0],
            })
            .collect();
        let t = PriceTable::new(vec!["A".into(), "B".into()], rows).unwrap();
        for row in 30..50 {
            for score in momentum_row(&t, row, 30).unwrap() {
                assert!((score - 0.0).abs() < f64::EPSILON);
            }
        }
    }
}
