//! Core domain types and engines.

pub mod prices;
pub mod momentum;
pub mod rebalance;
pub mod returns;
pub mod strategy;
pub mod metrics;
pub mod report;
pub mod config_validation;
pub mod error;
