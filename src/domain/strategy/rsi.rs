//! RSI mean-reversion strategy: buy oversold, sell overbought.

use super::{require_positive, Strategy};
use crate::domain::error::BacktestError;
use crate::domain::indicator::{relative_strength_index, IndicatorType};
use crate::domain::ohlcv::Bar;
use crate::domain::signal::Signal;

pub const DEFAULT_OVERSOLD: f64 = 30.0;
pub const DEFAULT_OVERBOUGHT: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiStrategy {
    period: usize,
    oversold: f64,
    overbought: f64,
}

impl RsiStrategy {
    pub fn new(period: usize) -> Result<Self, BacktestError> {
        Self::with_thresholds(period, DEFAULT_OVERSOLD, DEFAULT_OVERBOUGHT)
    }

    pub fn with_thresholds(
        period: usize,
        oversold: f64,
        overbought: f64,
    ) -> Result<Self, BacktestError> {
        require_positive("period", period)?;
        for (name, value) in [("oversold", oversold), ("overbought", overbought)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(BacktestError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("{value} is outside 0..=100"),
                });
            }
        }
        if oversold >= overbought {
            return Err(BacktestError::InvalidParameter {
                name: "oversold".to_string(),
                reason: format!("{oversold} must be below overbought {overbought}"),
            });
        }
        Ok(RsiStrategy {
            period,
            oversold,
            overbought,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn oversold(&self) -> f64 {
        self.oversold
    }

    pub fn overbought(&self) -> f64 {
        self.overbought
    }
}

impl Strategy for RsiStrategy {
    fn name(&self) -> String {
        format!(
            "{} {}/{}",
            IndicatorType::Rsi(self.period),
            self.oversold,
            self.overbought
        )
    }

    fn warmup_bars(&self) -> usize {
        IndicatorType::Rsi(self.period).required_bars()
    }

    fn evaluate(&self, history: &[Bar]) -> Signal {
        match relative_strength_index(history, self.period) {
            Some(rsi) if rsi < self.oversold => Signal::Buy,
            Some(rsi) if rsi > self.overbought => Signal::Sell,
            _ => Signal::Hold,
        }
    }
}
