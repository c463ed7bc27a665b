#![allow(dead_code)]

use chrono::NaiveDate;
use momtrader::domain::error::MomtraderError;
use momtrader::domain::prices::{PriceRow, PriceTable};
use momtrader::ports::data_port::PriceDataPort;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Build a table with one row per consecutive calendar day, prices supplied
/// by `price(row, asset)`.
pub fn make_table(
    assets: &[&str],
    start: NaiveDate,
    n_rows: usize,
    price: impl Fn(usize, usize) -> f64,
) -> PriceTable {
    let rows = (0..n_rows)
        .map(|i| PriceRow {
            date: start + chrono::Duration::days(i as i64),
            prices: (0..assets.len()).map(|a| price(i, a)).collect(),
        })
        .collect();
    PriceTable::new(assets.iter().map(|s| s.to_string()).collect(), rows).unwrap()
}

pub fn constant_table(assets: &[&str], start: NaiveDate, n_rows: usize) -> PriceTable {
    make_table(assets, start, n_rows, |_, a| 100.0 * (a + 1) as f64)
}

/// Prices trending at different per-asset slopes so momentum rankings are
/// unambiguous: asset `a` gains `a + 1` per day.
pub fn trending_table(assets: &[&str], start: NaiveDate, n_rows: usize) -> PriceTable {
    make_table(assets, start, n_rows, |i, a| {
        100.0 + (i * (a + 1)) as f64
    })
}

pub struct MockPricePort {
    pub table: Option<PriceTable>,
    pub error: Option<String>,
}

impl MockPricePort {
    pub fn with_table(table: PriceTable) -> Self {
        Self {
            table: Some(table),
            error: None,
        }
    }

    pub fn with_error(reason: &str) -> Self {
        Self {
            table: None,
            error: Some(reason.to_string()),
        }
    }
}

impl PriceDataPort for MockPricePort {
    fn fetch_prices(&self) -> Result<PriceTable, MomtraderError> {
        if let Some(reason) = &self.error {
            return Err(MomtraderError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.table.clone().unwrap())
    }
}
