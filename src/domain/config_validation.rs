//! Configuration validation.
//!
//! Validates all config fields before a backtest runs. Missing keys fall back
//! to their defaults; present keys must hold sensible values.

use crate::domain::error::BacktestError;
use crate::ports::config_port::ConfigPort;

pub const STRATEGY_KINDS: [&str; 2] = ["ma_crossover", "rsi"];

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    validate_starting_cash(config)?;
    validate_fraction(config, "buy_cash_fraction", 0.5)?;
    validate_fraction(config, "sell_position_fraction", 1.0)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    let kind = config
        .get_string("strategy", "kind")
        .unwrap_or_else(|| "ma_crossover".to_string());

    validate_strategy_kind(config, kind.trim())
}

/// Check the `[strategy]` keys that strategy `kind` reads, whatever kind the
/// config itself names.
pub fn validate_strategy_kind(config: &dyn ConfigPort, kind: &str) -> Result<(), BacktestError> {
    match kind {
        "ma_crossover" => {
            validate_period(config, "short_period", 3)?;
            validate_period(config, "long_period", 5)?;
        }
        "rsi" => {
            validate_period(config, "period", 14)?;
            validate_thresholds(config)?;
        }
        other => {
            return Err(invalid(
                "strategy",
                "kind",
                format!("unknown strategy {other:?}, expected one of {STRATEGY_KINDS:?}"),
            ));
        }
    }
    Ok(())
}

fn validate_starting_cash(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    let value = config.get_double("backtest", "starting_cash", 10_000.0);
    if !(value.is_finite() && value > 0.0) {
        return Err(invalid(
            "backtest",
            "starting_cash",
            "starting_cash must be positive".to_string(),
        ));
    }
    Ok(())
}

fn validate_fraction(config: &dyn ConfigPort, key: &str, default: f64) -> Result<(), BacktestError> {
    let value = config.get_double("backtest", key, default);
    if !(value > 0.0 && value <= 1.0) {
        return Err(invalid(
            "backtest",
            key,
            format!("{key} must be in (0, 1]"),
        ));
    }
    Ok(())
}

fn validate_period(config: &dyn ConfigPort, key: &str, default: i64) -> Result<(), BacktestError> {
    let value = config.get_int("strategy", key, default);
    if value < 1 {
        return Err(invalid(
            "strategy",
            key,
            format!("{key} must be at least 1"),
        ));
    }
    Ok(())
}

fn validate_thresholds(config: &dyn ConfigPort) -> Result<(), BacktestError> {
    let oversold = config.get_double("strategy", "oversold", 30.0);
    let overbought = config.get_double("strategy", "overbought", 70.0);

    for (key, value) in [("oversold", oversold), ("overbought", overbought)] {
        if !(0.0..=100.0).contains(&value) {
            return Err(invalid(
                "strategy",
                key,
                format!("{key} must be between 0 and 100"),
            ));
        }
    }
    if oversold >= overbought {
        return Err(invalid(
            "strategy",
            "oversold",
            "oversold must be below overbought".to_string(),
        ));
    }
    Ok(())
}

fn invalid(section: &str, key: &str, reason: String) -> BacktestError {
    BacktestError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    }
}
