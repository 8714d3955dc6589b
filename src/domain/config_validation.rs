//! Configuration validation.
//!
//! Every key is optional and has a default; a key that is present must parse
//! and be in range. Runs before any data is loaded.

use crate::domain::backtest::MAX_TRAILING_YEARS;
use crate::domain::error::DcaError;
use crate::domain::pooled_backtest::AssetWeights;
use crate::domain::schedule::{MAX_INVEST_DAY, MIN_INVEST_DAY};
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), DcaError> {
    validate_backtest_config(config)?;
    validate_ma250_config(config)?;
    validate_dip_buy_config(config)?;
    Ok(())
}

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), DcaError> {
    validate_invest_day(config)?;
    validate_trailing_years(config)?;
    validate_dates(config)?;
    Ok(())
}

pub fn validate_ma250_config(config: &dyn ConfigPort) -> Result<(), DcaError> {
    validate_symbol(config)?;
    validate_positive(config, "ma250_drawdown", "base_amount")?;
    Ok(())
}

pub fn validate_dip_buy_config(config: &dyn ConfigPort) -> Result<(), DcaError> {
    validate_symbols(config)?;
    validate_weights(config)?;
    validate_positive(config, "etf_dca_dip_buy", "monthly_total")?;
    validate_non_negative(config, "etf_dca_dip_buy", "annual_pool")?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> DcaError {
    DcaError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn number(config: &dyn ConfigPort, section: &str, key: &str) -> Result<Option<f64>, DcaError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| invalid(section, key, format!("{} must be a number", key))),
    }
}

fn integer(config: &dyn ConfigPort, section: &str, key: &str) -> Result<Option<i64>, DcaError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| invalid(section, key, format!("{} must be an integer", key))),
    }
}

fn validate_invest_day(config: &dyn ConfigPort) -> Result<(), DcaError> {
    if let Some(day) = integer(config, "backtest", "invest_day")? {
        if day < MIN_INVEST_DAY as i64 || day > MAX_INVEST_DAY as i64 {
            return Err(invalid(
                "backtest",
                "invest_day",
                format!("invest_day must be between {} and {}", MIN_INVEST_DAY, MAX_INVEST_DAY),
            ));
        }
    }
    Ok(())
}

fn validate_trailing_years(config: &dyn ConfigPort) -> Result<(), DcaError> {
    if let Some(years) = integer(config, "backtest", "trailing_years")? {
        if years < 1 || years > MAX_TRAILING_YEARS as i64 {
            return Err(invalid(
                "backtest",
                "trailing_years",
                format!("trailing_years must be between 1 and {}", MAX_TRAILING_YEARS),
            ));
        }
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), DcaError> {
    let start = config
        .get_string("backtest", "start_date")
        .map(|s| parse_date(&s, "start_date"))
        .transpose()?;
    let end = config
        .get_string("backtest", "end_date")
        .map(|s| parse_date(&s, "end_date"))
        .transpose()?;

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(invalid(
                "backtest",
                "start_date",
                "start_date must be before end_date",
            ));
        }
    }
    Ok(())
}

pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, DcaError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        invalid(
            "backtest",
            field,
            format!("invalid {} format, expected YYYY-MM-DD", field),
        )
    })
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), DcaError> {
    match config.get_string("ma250_drawdown", "symbol") {
        Some(s) if s.trim().is_empty() => Err(invalid(
            "ma250_drawdown",
            "symbol",
            "symbol must not be empty",
        )),
        _ => Ok(()),
    }
}

fn validate_symbols(config: &dyn ConfigPort) -> Result<(), DcaError> {
    if let Some(s) = config.get_string("etf_dca_dip_buy", "symbols") {
        parse_symbol_pair(&s).map_err(|reason| invalid("etf_dca_dip_buy", "symbols", reason))?;
    }
    Ok(())
}

fn validate_weights(config: &dyn ConfigPort) -> Result<(), DcaError> {
    if let Some(s) = config.get_string("etf_dca_dip_buy", "weights") {
        let (a, b) =
            parse_weight_pair(&s).map_err(|reason| invalid("etf_dca_dip_buy", "weights", reason))?;
        AssetWeights::new(a, b)
            .map_err(|e| invalid("etf_dca_dip_buy", "weights", e.to_string()))?;
    }
    Ok(())
}

fn validate_positive(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), DcaError> {
    match number(config, section, key)? {
        Some(value) if !(value > 0.0) => {
            Err(invalid(section, key, format!("{} must be positive", key)))
        }
        _ => Ok(()),
    }
}

fn validate_non_negative(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), DcaError> {
    match number(config, section, key)? {
        Some(value) if !(value >= 0.0) => {
            Err(invalid(section, key, format!("{} must be non-negative", key)))
        }
        _ => Ok(()),
    }
}

/// Split a comma-separated list, trimming and dropping empty items.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Exactly two symbols, e.g. `SPY,QQQ`.
pub fn parse_symbol_pair(value: &str) -> Result<(String, String), String> {
    match split_list(value).as_slice() {
        [a, b] => Ok((a.clone(), b.clone())),
        other => Err(format!("expected exactly two symbols, got {}", other.len())),
    }
}

/// Exactly two numbers, e.g. `0.6,0.4`. Range checks are left to [`AssetWeights`].
pub fn parse_weight_pair(value: &str) -> Result<(f64, f64), String> {
    let items = split_list(value);
    let [a, b] = items.as_slice() else {
        return Err(format!("expected exactly two weights, got {}", items.len()));
    };
    let parse = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| format!("weight '{}' is not a number", s))
    };
    Ok((parse(a.as_str())?, parse(b.as_str())?))
}
