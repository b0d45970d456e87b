//! Technical indicators evaluated over a bar history.
//!
//! Every indicator takes the prefix of bars ending at the bar being decided
//! on and returns `None` while there is not enough history to compute it.

pub mod rsi;
pub mod sma;

pub use rsi::relative_strength_index;
pub use sma::simple_moving_average;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
}

impl IndicatorType {
    /// Number of bars needed before the indicator first yields a value.
    pub fn required_bars(&self) -> usize {
        match self {
            IndicatorType::Sma(period) => *period,
            IndicatorType::Rsi(period) => period + 1,
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_type_display() {
        assert_eq!(IndicatorType::Sma(20).to_string(), "SMA(20)");
        assert_eq!(IndicatorType::Rsi(14).to_string(), "RSI(14)");
    }

    #[test]
    fn required_bars() {
        assert_eq!(IndicatorType::Sma(5).required_bars(), 5);
        assert_eq!(IndicatorType::Rsi(14).required_bars(), 15);
    }
}
