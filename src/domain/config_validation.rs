//! Configuration validation.
//!
//! Validates all config fields before an analysis run.

use crate::domain::error::IntrinsicError;
use crate::domain::universe::parse_tickers;
use crate::domain::valuation::{
    DEFAULT_BETA, DEFAULT_DEBT_TO_EQUITY, DEFAULT_MARKET_RISK_PREMIUM, DEFAULT_PROJECTION_YEARS,
    DEFAULT_RISK_FREE_RATE, DEFAULT_TAX_RATE, DEFAULT_TERMINAL_GROWTH_RATE,
};
use crate::ports::config_port::ConfigPort;

pub const MAX_PROJECTION_YEARS: i64 = 50;
pub const DEFAULT_TOP_N: i64 = 15;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), IntrinsicError> {
    validate_valuation_config(config)?;
    validate_universe_config(config)?;
    validate_report_config(config)?;
    Ok(())
}

pub fn validate_valuation_config(config: &dyn ConfigPort) -> Result<(), IntrinsicError> {
    validate_rate(config, "risk_free_rate", DEFAULT_RISK_FREE_RATE)?;
    validate_market_risk_premium(config)?;
    validate_beta(config)?;
    validate_debt_to_equity(config)?;
    validate_rate(config, "terminal_growth_rate", DEFAULT_TERMINAL_GROWTH_RATE)?;
    validate_rate(config, "tax_rate", DEFAULT_TAX_RATE)?;
    validate_projection_years(config)?;
    validate_growth_override(config)?;
    Ok(())
}

pub fn validate_universe_config(config: &dyn ConfigPort) -> Result<(), IntrinsicError> {
    if let Some(tickers) = config.get_string("universe", "tickers") {
        parse_tickers(&tickers).map_err(|e| invalid("universe", "tickers", e.to_string()))?;
    }
    if config.get_string("universe", "limit").is_some() {
        let limit = config.get_int("universe", "limit", 0)?;
        if limit < 1 {
            return Err(invalid("universe", "limit", "limit must be a positive integer"));
        }
    }
    Ok(())
}

pub fn validate_report_config(config: &dyn ConfigPort) -> Result<(), IntrinsicError> {
    let top_n = config.get_int("report", "top_n", DEFAULT_TOP_N)?;
    if top_n < 1 {
        return Err(invalid("report", "top_n", "top_n must be at least 1"));
    }
    config.get_bool("report", "write_csv", true)?;
    Ok(())
}

pub fn invalid(section: &str, key: &str, reason: impl Into<String>) -> IntrinsicError {
    IntrinsicError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Rates must lie in [0, 1).
fn validate_rate(config: &dyn ConfigPort, key: &str, default: f64) -> Result<(), IntrinsicError> {
    let value = config.get_double("valuation", key, default)?;
    if !(0.0..1.0).contains(&value) {
        return Err(invalid(
            "valuation",
            key,
            format!("{key} must be between 0 and 1"),
        ));
    }
    Ok(())
}

fn validate_market_risk_premium(config: &dyn ConfigPort) -> Result<(), IntrinsicError> {
    let value =
        config.get_double("valuation", "market_risk_premium", DEFAULT_MARKET_RISK_PREMIUM)?;
    if value < 0.0 {
        return Err(invalid(
            "valuation",
            "market_risk_premium",
            "market_risk_premium must be non-negative",
        ));
    }
    Ok(())
}

fn validate_beta(config: &dyn ConfigPort) -> Result<(), IntrinsicError> {
    let value = config.get_double("valuation", "beta", DEFAULT_BETA)?;
    if value <= 0.0 {
        return Err(invalid("valuation", "beta", "beta must be positive"));
    }
    Ok(())
}

fn validate_debt_to_equity(config: &dyn ConfigPort) -> Result<(), IntrinsicError> {
    let value = config.get_double("valuation", "debt_to_equity", DEFAULT_DEBT_TO_EQUITY)?;
    if value < 0.0 {
        return Err(invalid(
            "valuation",
            "debt_to_equity",
            "debt_to_equity must be non-negative",
        ));
    }
    Ok(())
}

fn validate_projection_years(config: &dyn ConfigPort) -> Result<(), IntrinsicError> {
    let value = config.get_int(
        "valuation",
        "projection_years",
        DEFAULT_PROJECTION_YEARS as i64,
    )?;
    if !(1..=MAX_PROJECTION_YEARS).contains(&value) {
        return Err(invalid(
            "valuation",
            "projection_years",
            format!("projection_years must be between 1 and {MAX_PROJECTION_YEARS}"),
        ));
    }
    Ok(())
}

fn validate_growth_override(config: &dyn ConfigPort) -> Result<(), IntrinsicError> {
    if config.get_string("valuation", "growth_rate").is_none() {
        return Ok(());
    }
    let value = config.get_double("valuation", "growth_rate", 0.0)?;
    if !(-1.0..=1.0).contains(&value) {
        return Err(invalid(
            "valuation",
            "growth_rate",
            "growth_rate must be between -1 and 1",
        ));
    }
    Ok(())
}
