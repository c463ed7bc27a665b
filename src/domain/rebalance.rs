//! Monthly rebalance scheduling and target weight selection.
//!
//! A rebalance point is the last table row of its (year, month), judged by
//! table order alone, restricted to rows with a defined momentum score
//! (`row >= lookback`). The final row of the table is always the last row of
//! its month, so an eligible final row is always a rebalance point.

use chrono::{Datelike, NaiveDate};

use crate::domain::error::MomtraderError;
use crate::domain::prices::PriceTable;

/// Per-asset target weights, aligned with the table's asset order. Unselected
/// assets carry weight zero; the remainder (if any) is uninvested cash.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector {
    weights: Vec<f64>,
}

impl WeightVector {
    pub fn zero(n_assets: usize) -> Self {
        Self {
            weights: vec![0.0; n_assets],
        }
    }

    /// Equal weight (1/top_k) on each selected asset index.
    pub fn equal_weight(n_assets: usize, selected: &[usize]) -> Self {
        let mut weights = vec![0.0; n_assets];
        let w = 1.0 / selected.len() as f64;
        for &a in selected {
            weights[a] = w;
        }
        Self { weights }
    }

    pub fn get(&self, asset: usize) -> f64 {
        self.weights[asset]
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }
}

/// A scheduled rebalance: the date weights were fixed and the assets chosen.
#[derive(Debug, Clone)]
pub struct RebalanceEvent {
    pub date: NaiveDate,
    pub row: usize,
    pub selected: Vec<usize>,
    pub weights: WeightVector,
}

/// Row indices of the month-end rebalance points within the eligible range.
///
/// Row `i` qualifies when `i >= lookback` and either `i` is the final row or
/// row `i + 1` belongs to a different (year, month).
pub fn rebalance_rows(table: &PriceTable, lookback: usize) -> Vec<usize> {
    let n = table.n_rows();
    (lookback..n)
        .filter(|&i| i + 1 == n || year_month(table.date(i + 1)) != year_month(table.date(i)))
        .collect()
}

fn year_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

/// Indices of the `top_k` assets by descending momentum score.
///
/// Ties resolve deterministically: the sort is stable, so assets with equal
/// scores keep their table column order and the earlier column wins the
/// contested rank.
pub fn select_top_k(scores: &[f64], top_k: usize) -> Result<Vec<usize>, MomtraderError> {
    let mut ranked: Vec<usize> = (0..scores.len()).filter(|&a| scores[a].is_finite()).collect();
    if ranked.len() < top_k {
        return Err(MomtraderError::InsufficientData {
            what: "assets with momentum scores",
            have: ranked.len(),
            need: top_k,
        });
    }
    ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    ranked.truncate(top_k);
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prices::PriceRow;

    fn table_from(start: NaiveDate, n: usize) -> PriceTable {
        let rows = (0..n)
            .map(|i| PriceRow {
                date: start + chrono::Duration::days(i as i64),
                prices: vec![100.0 + i as f64],
            })
            .collect();
        PriceTable::new(vec!["A".into()], rows).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_ends_by_table_order() {
        // Jan 26 .. Mar 5 2024 (leap year), 40 consecutive rows.
        let t = table_from(date(2024, 1, 26), 40);
        let rows = rebalance_rows(&t, 0);
        let dates: Vec<NaiveDate> = rows.iter().map(|&i| t.date(i)).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 5)]
        );
    }

    #[test]
    fn eligibility_excludes_early_rows() {
        let t = table_from(date(2024, 1, 26), 40);
        // Rows 30..39 are Feb 25 .. Mar 5, so January's month-end drops out.
        let rows = rebalance_rows(&t, 30);
        let dates: Vec<NaiveDate> = rows.iter().map(|&i| t.date(i)).collect();
        assert_eq!(dates, vec![date(2024, 2, 29), date(2024, 3, 5)]);
    }

    #[test]
    fn rebalance_rows_strictly_increasing() {
        let t = table_from(date(2024, 1, 1), 200);
        let rows = rebalance_rows(&t, 30);
        assert!(rows.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn rebalance_count_matches_distinct_months() {
        let t = table_from(date(2024, 1, 1), 200);
        let lookback = 30;
        let rows = rebalance_rows(&t, lookback);
        let mut months: Vec<(i32, u32)> = (lookback..t.n_rows())
            .map(|i| year_month(t.date(i)))
            .collect();
        months.dedup();
        assert_eq!(rows.len(), months.len());
    }

    #[test]
    fn top_k_descending() {
        let selected = select_top_k(&[0.1, 0.5, -0.2, 0.3], 2).unwrap();
        assert_eq!(selected, vec![1, 3]);
    }

    #[test]
    fn tie_breaks_by_column_order() {
        // Assets 0, 1 and 3 tie at 0.2; the earlier columns win.
        let selected = select_top_k(&[0.2, 0.2, 0.1, 0.2], 2).unwrap();
        assert_eq!(selected, vec![0, 1]);

        // Tie on the k-th rank only: asset 0 leads, then 1 beats 3.
        let selected = select_top_k(&[0.5, 0.2, 0.1, 0.2], 2).unwrap();
        assert_eq!(selected, vec![0, 1]);
    }

    #[test]
    fn too_few_scored_assets_is_an_error() {
        let err = select_top_k(&[0.1], 2).unwrap_err();
        assert!(matches!(err, MomtraderError::InsufficientData { .. }));
        let err = select_top_k(&[0.1, f64::NAN], 2).unwrap_err();
        assert!(matches!(err, MomtraderError::InsufficientData { .. }));
    }

    #[test]
    fn equal_weights_sum_to_one() {
        let w = WeightVector::equal_weight(4, &[1, 3]);
        assert!((w.sum() - 1.0).abs() < 1e-12);
        assert!((w.get(1) - 0.5).abs() < f64::EPSILON);
        assert!((w.get(3) - 0.5).abs() < f64::EPSILON);
        assert!((w.get(0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_vector_is_all_cash() {
        let w = WeightVector::zero(3);
        assert!((w.sum() - 0.0).abs() < f64::EPSILON);
    }
}
