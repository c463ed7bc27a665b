//! Realized daily return series.

use chrono::NaiveDate;

/// One realized portfolio return: the simple return over the trading day
/// ending on `date`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Ordered daily return series produced by one strategy run. Immutable once
/// built; consumed by the metrics engine.
#[derive(Debug, Clone, Default)]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    pub fn new(points: Vec<ReturnPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Cumulative wealth curve: running product of (1 + r), starting from a
    /// notional 1.0 before the first return.
    pub fn wealth_curve(&self) -> Vec<f64> {
        let mut wealth = 1.0;
        self.points
            .iter()
            .map(|p| {
                wealth *= 1.0 + p.value;
                wealth
            })
            .collect()
    }
}
