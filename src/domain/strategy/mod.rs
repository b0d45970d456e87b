//! Strategy capability and its configuration.
//!
//! A strategy is a pure function of the bar history up to and including the
//! bar being decided on. [`Strategy::analyze`] hands implementations only that
//! prefix, so reading future bars is impossible by construction.

pub mod ma_crossover;
pub mod rsi;

pub use ma_crossover::MaCrossover;
pub use rsi::RsiStrategy;

use crate::domain::error::BacktestError;
use crate::domain::ohlcv::Bar;
use crate::domain::series::BarSeries;
use crate::domain::signal::Signal;

pub trait Strategy {
    /// Display name including parameters, e.g. `SMA(3)/SMA(5) crossover`.
    fn name(&self) -> String;

    /// Bars of history required before the strategy can emit anything but Hold.
    fn warmup_bars(&self) -> usize;

    /// Decide on the last bar of `history`. `history` is never empty.
    fn evaluate(&self, history: &[Bar]) -> Signal;

    /// Decide on bar `index` of `series`, seeing only bars `[0, index]`.
    fn analyze(&self, series: &BarSeries, index: usize) -> Result<Signal, BacktestError> {
        let history = series.history(index)?;
        Ok(self.evaluate(history))
    }
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn warmup_bars(&self) -> usize {
        (**self).warmup_bars()
    }

    fn evaluate(&self, history: &[Bar]) -> Signal {
        (**self).evaluate(history)
    }
}

/// Parameters of a strategy as read from configuration or the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategySpec {
    MaCrossover {
        short_period: usize,
        long_period: usize,
    },
    Rsi {
        period: usize,
        oversold: f64,
        overbought: f64,
    },
}

impl StrategySpec {
    /// The `[strategy] kind` value that selects this strategy.
    pub fn kind(&self) -> &'static str {
        match self {
            StrategySpec::MaCrossover { .. } => "ma_crossover",
            StrategySpec::Rsi { .. } => "rsi",
        }
    }

    pub fn build(&self) -> Result<Box<dyn Strategy>, BacktestError> {
        Ok(match *self {
            StrategySpec::MaCrossover {
                short_period,
                long_period,
            } => Box::new(MaCrossover::new(short_period, long_period)?),
            StrategySpec::Rsi {
                period,
                oversold,
                overbought,
            } => Box::new(RsiStrategy::with_thresholds(period, oversold, overbought)?),
        })
    }
}

pub(crate) fn require_positive(name: &str, value: usize) -> Result<(), BacktestError> {
    if value == 0 {
        return Err(BacktestError::InvalidParameter {
            name: name.to_string(),
            reason: "must be a positive integer".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysBuy;

    impl Strategy for AlwaysBuy {
        fn name(&self) -> String {
            "always buy".into()
        }

        fn warmup_bars(&self) -> usize {
            0
        }

        fn evaluate(&self, _history: &[Bar]) -> Signal {
            Signal::Buy
        }
    }

    fn series(n: usize) -> BarSeries {
        BarSeries::from_bars(
            (0..n)
                .map(|i| Bar {
                    timestamp: i as f64,
                    open: 1.0,
                    high: 1.0,
                    low: 1.0,
                    close: 1.0,
                    volume: 1.0,
                })
                .collect(),
        )
    }

    #[test]
    fn analyze_rejects_out_of_range_index() {
        let err = AlwaysBuy.analyze(&series(3), 3).unwrap_err();
        assert!(matches!(
            err,
            BacktestError::IndexOutOfRange { index: 3, len: 3 }
        ));
    }

    #[test]
    fn analyze_in_range() {
        assert_eq!(AlwaysBuy.analyze(&series(3), 2).unwrap(), Signal::Buy);
    }

    #[test]
    fn build_ma_crossover() {
        let spec = StrategySpec::MaCrossover {
            short_period: 3,
            long_period: 5,
        };
        let strategy = spec.build().unwrap();
        assert_eq!(strategy.name(), "SMA(3)/SMA(5) crossover");
        assert_eq!(strategy.warmup_bars(), 5);
        assert_eq!(spec.kind(), "ma_crossover");
    }

    #[test]
    fn build_rsi() {
        let spec = StrategySpec::Rsi {
            period: 14,
            oversold: 30.0,
            overbought: 70.0,
        };
        let strategy = spec.build().unwrap();
        assert_eq!(strategy.name(), "RSI(14) 30/70");
        assert_eq!(strategy.warmup_bars(), 15);
        assert_eq!(spec.kind(), "rsi");
    }

    #[test]
    fn build_rejects_zero_period() {
        let spec = StrategySpec::Rsi {
            period: 0,
            oversold: 30.0,
            overbought: 70.0,
        };
        assert!(matches!(
            spec.build(),
            Err(BacktestError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn boxed_strategy_delegates() {
        let boxed: Box<dyn Strategy> = Box::new(AlwaysBuy);
        assert_eq!(boxed.analyze(&series(1), 0).unwrap(), Signal::Buy);
    }
}
