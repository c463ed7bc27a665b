//! Configuration validation.
//!
//! All config fields are validated once, before any strategy run; engines
//! never re-validate at call sites.

use crate::domain::error::MomtraderError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_LOOKBACK_SHORT: i64 = 30;
pub const DEFAULT_LOOKBACK_LONG: i64 = 90;
pub const DEFAULT_TOP_K: i64 = 2;
pub const DEFAULT_PERIODS_PER_YEAR: i64 = 252;

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), MomtraderError> {
    validate_lookback(config, "lookback_short", DEFAULT_LOOKBACK_SHORT)?;
    validate_lookback(config, "lookback_long", DEFAULT_LOOKBACK_LONG)?;
    validate_top_k(config)?;
    Ok(())
}

pub fn validate_metrics_config(config: &dyn ConfigPort) -> Result<(), MomtraderError> {
    validate_periods_per_year(config)?;
    validate_risk_free_rate(config)?;
    validate_target_return(config)?;
    Ok(())
}

fn validate_lookback(
    config: &dyn ConfigPort,
    key: &str,
    default: i64,
) -> Result<(), MomtraderError> {
    let value = config.get_int("strategy", key, default);
    if value <= 0 {
        return Err(MomtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: key.to_string(),
            reason: format!("{key} must be a positive number of trading days"),
        });
    }
    Ok(())
}

fn validate_top_k(config: &dyn ConfigPort) -> Result<(), MomtraderError> {
    let value = config.get_int("strategy", "top_k", DEFAULT_TOP_K);
    if value <= 0 {
        return Err(MomtraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "top_k".to_string(),
            reason: "top_k must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_periods_per_year(config: &dyn ConfigPort) -> Result<(), MomtraderError> {
    let value = config.get_int("metrics", "periods_per_year", DEFAULT_PERIODS_PER_YEAR);
    if value <= 0 {
        return Err(MomtraderError::ConfigInvalid {
            section: "metrics".to_string(),
            key: "periods_per_year".to_string(),
            reason: "periods_per_year must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_risk_free_rate(config: &dyn ConfigPort) -> Result<(), MomtraderError> {
    let value = config.get_double("metrics", "risk_free_rate", 0.0);
    if !(0.0..1.0).contains(&value) {
        return Err(MomtraderError::ConfigInvalid {
            section: "metrics".to_string(),
            key: "risk_free_rate".to_string(),
            reason: "risk_free_rate must be between 0 and 1".to_string(),
        });
    }
    Ok(())
}

fn validate_target_return(config: &dyn ConfigPort) -> Result<(), MomtraderError> {
    let value = config.get_double("metrics", "target_return", 0.0);
    if !(-1.0..1.0).contains(&value) {
        return Err(MomtraderError::ConfigInvalid {
            section: "metrics".to_string(),
            key: "target_return".to_string(),
            reason: "target_return must be an annualized decimal between -1 and 1".to_string(),
        });
    }
    Ok(())
}
