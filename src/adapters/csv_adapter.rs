//! Wide-CSV price data adapter.
//!
//! Expects a header of `Date,ASSET,...` and one row per trading day with
//! `%Y-%m-%d` dates. Rows are sorted by date, empty cells are forward-filled
//! with the previous trading day's price, and leading rows that still have a
//! gap after filling are dropped.

use crate::domain::error::MomtraderError;
use crate::domain::prices::{PriceRow, PriceTable};
use crate::ports::data_port::PriceDataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvPriceAdapter {
    path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn parse(&self, content: &str) -> Result<PriceTable, MomtraderError> {
        let mut rdr = csv::Reader::from_reader(content.as_bytes());

        let headers = rdr.headers().map_err(|e| MomtraderError::DataSource {
            reason: format!("CSV header error: {}", e),
        })?;
        if headers.len() < 2 {
            return Err(MomtraderError::DataSource {
                reason: "CSV needs a Date column and at least one asset column".into(),
            });
        }
        let assets: Vec<String> = headers.iter().skip(1).map(|h| h.trim().to_string()).collect();

        let mut raw: Vec<(NaiveDate, Vec<Option<f64>>)> = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| MomtraderError::DataSource {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| MomtraderError::DataSource {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                MomtraderError::DataSource {
                    reason: format!("invalid date {:?}: {}", date_str, e),
                }
            })?;

            let mut prices = Vec::with_capacity(assets.len());
            for (a, asset) in assets.iter().enumerate() {
                let cell = record.get(a + 1).unwrap_or("").trim();
                if cell.is_empty() {
                    prices.push(None);
                } else {
                    let price: f64 = cell.parse().map_err(|e| MomtraderError::DataSource {
                        reason: format!("invalid price for {} on {}: {}", asset, date, e),
                    })?;
                    prices.push(Some(price));
                }
            }
            raw.push((date, prices));
        }

        raw.sort_by_key(|(date, _)| *date);

        // Forward fill: a missing quote keeps the most recent traded price.
        let mut last: Vec<Option<f64>> = vec![None; assets.len()];
        for (_, prices) in raw.iter_mut() {
            for (a, price) in prices.iter_mut().enumerate() {
                match price {
                    Some(p) => last[a] = Some(*p),
                    None => *price = last[a],
                }
            }
        }

        // Leading rows with nothing to fill from are dropped.
        let rows: Vec<PriceRow> = raw
            .into_iter()
            .skip_while(|(_, prices)| prices.iter().any(|p| p.is_none()))
            .map(|(date, prices)| PriceRow {
                date,
                prices: prices.into_iter().map(|p| p.unwrap()).collect(),
            })
            .collect();

        PriceTable::new(assets, rows)
    }
}

impl PriceDataPort for CsvPriceAdapter {
    fn fetch_prices(&self) -> Result<PriceTable, MomtraderError> {
        let content = fs::read_to_string(&self.path).map_err(|e| MomtraderError::DataSource {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        self.parse(&content)
    }
}
