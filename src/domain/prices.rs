//! Multi-asset daily price table.
//!
//! The table is the read-only input to the strategy engine: one row per
//! trading day, one column per asset, dates strictly ascending. The data
//! source (CSV adapter) is responsible for sorting and gap-filling; the
//! constructor here still rejects malformed tables loudly rather than
//! coercing them.

use crate::domain::error::MomtraderError;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub prices: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct PriceTable {
    assets: Vec<String>,
    rows: Vec<PriceRow>,
}

impl PriceTable {
    /// Build a table, validating the data-source guarantees: at least one
    /// asset, strictly increasing dates, and one finite positive price per
    /// asset in every row.
    pub fn new(assets: Vec<String>, rows: Vec<PriceRow>) -> Result<Self, MomtraderError> {
        if assets.is_empty() {
            return Err(MomtraderError::InvalidTable {
                reason: "table has no asset columns".to_string(),
            });
        }

        for (i, row) in rows.iter().enumerate() {
            if row.prices.len() != assets.len() {
                return Err(MomtraderError::InvalidTable {
                    reason: format!(
                        "row {} has {} prices, expected {}",
                        row.date,
                        row.prices.len(),
                        assets.len()
                    ),
                });
            }
            if let Some((a, _)) = row
                .prices
                .iter()
                .enumerate()
                .find(|(_, p)| !p.is_finite() || **p <= 0.0)
            {
                return Err(MomtraderError::InvalidTable {
                    reason: format!("non-positive price for {} on {}", assets[a], row.date),
                });
            }
            if i > 0 && row.date <= rows[i - 1].date {
                return Err(MomtraderError::InvalidTable {
                    reason: format!("dates not strictly increasing at {}", row.date),
                });
            }
        }

        Ok(Self { assets, rows })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_assets(&self) -> usize {
        self.assets.len()
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    pub fn date(&self, row: usize) -> NaiveDate {
        self.rows[row].date
    }

    pub fn price(&self, row: usize, asset: usize) -> f64 {
        self.rows[row].prices[asset]
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    /// Simple daily return for one asset: price[row] / price[row-1] - 1.
    /// Panics if `row == 0`; callers always iterate from row 1.
    pub fn daily_return(&self, row: usize, asset: usize) -> f64 {
        debug_assert!(row > 0);
        self.price(row, asset) / self.price(row - 1, asset) - 1.0
    }
}
