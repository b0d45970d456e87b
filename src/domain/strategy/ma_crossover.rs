//! Moving-average crossover strategy.
//!
//! Buy while the short SMA is above the long SMA, sell while it is below,
//! hold when they are equal or either average is still warming up.

use super::{require_positive, Strategy};
use crate::domain::error::BacktestError;
use crate::domain::indicator::{simple_moving_average, IndicatorType};
use crate::domain::ohlcv::Bar;
use crate::domain::signal::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaCrossover {
    short_period: usize,
    long_period: usize,
}

impl MaCrossover {
    /// Both periods must be positive. Their relative order is not checked:
    /// a short period longer than the long one inverts the signal.
    pub fn new(short_period: usize, long_period: usize) -> Result<Self, BacktestError> {
        require_positive("short_period", short_period)?;
        require_positive("long_period", long_period)?;
        Ok(MaCrossover {
            short_period,
            long_period,
        })
    }

    pub fn short_period(&self) -> usize {
        self.short_period
    }

    pub fn long_period(&self) -> usize {
        self.long_period
    }
}

impl Strategy for MaCrossover {
    fn name(&self) -> String {
        format!(
            "{}/{} crossover",
            IndicatorType::Sma(self.short_period),
            IndicatorType::Sma(self.long_period)
        )
    }

    fn warmup_bars(&self) -> usize {
        self.short_period.max(self.long_period)
    }

    fn evaluate(&self, history: &[Bar]) -> Signal {
        let short = simple_moving_average(history, self.short_period);
        let long = simple_moving_average(history, self.long_period);

        match (short, long) {
            (Some(short), Some(long)) if short > long => Signal::Buy,
            (Some(short), Some(long)) if short < long => Signal::Sell,
            _ => Signal::Hold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::BarSeries;

    fn series(closes: &[f64]) -> BarSeries {
        BarSeries::from_bars(
            closes
                .iter()
                .enumerate()
                .map(|(i, &close)| Bar {
                    timestamp: i as f64,
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 1000.0,
                })
                .collect(),
        )
    }

    #[test]
    fn warmup_holds() {
        let s = series(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        let strategy = MaCrossover::new(3, 5).unwrap();
        for i in 0..4 {
            assert_eq!(strategy.analyze(&s, i).unwrap(), Signal::Hold, "index {i}");
        }
    }

    #[test]
    fn crossover_buy() {
        let s = series(&[10.0, 10.0, 10.0, 10.0, 10.0, 20.0]);
        let strategy = MaCrossover::new(3, 5).unwrap();
        assert_eq!(strategy.analyze(&s, 5).unwrap(), Signal::Buy);
    }

    #[test]
    fn crossover_sell() {
        let s = series(&[20.0, 20.0, 20.0, 20.0, 20.0, 10.0]);
        let strategy = MaCrossover::new(3, 5).unwrap();
        assert_eq!(strategy.analyze(&s, 5).unwrap(), Signal::Sell);
    }

    #[test]
    fn equal_averages_hold() {
        let s = series(&[10.0; 6]);
        let strategy = MaCrossover::new(3, 5).unwrap();
        assert_eq!(strategy.analyze(&s, 5).unwrap(), Signal::Hold);
    }

    #[test]
    fn first_defined_index() {
        let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let strategy = MaCrossover::new(3, 5).unwrap();
        // rising prices: short SMA(3)=4 > long SMA(5)=3
        assert_eq!(strategy.analyze(&s, 4).unwrap(), Signal::Buy);
    }

    #[test]
    fn zero_averages_are_compared() {
        let s = series(&[5.0, 5.0, 0.0, 0.0, 0.0]);
        let strategy = MaCrossover::new(3, 5).unwrap();
        // short 0.0 < long 2.0
        assert_eq!(strategy.analyze(&s, 4).unwrap(), Signal::Sell);
    }

    #[test]
    fn inverted_periods_invert_signal() {
        let s = series(&[10.0, 10.0, 10.0, 10.0, 10.0, 20.0]);
        let strategy = MaCrossover::new(5, 3).unwrap();
        assert_eq!(strategy.analyze(&s, 5).unwrap(), Signal::Sell);
    }

    #[test]
    fn zero_period_rejected() {
        assert!(matches!(
            MaCrossover::new(0, 5),
            Err(BacktestError::InvalidParameter { name, .. }) if name == "short_period"
        ));
        assert!(matches!(
            MaCrossover::new(3, 0),
            Err(BacktestError::InvalidParameter { name, .. }) if name == "long_period"
        ));
    }

    #[test]
    fn name_and_warmup() {
        let strategy = MaCrossover::new(3, 5).unwrap();
        assert_eq!(strategy.name(), "SMA(3)/SMA(5) crossover");
        assert_eq!(strategy.warmup_bars(), 5);
        assert_eq!(strategy.short_period(), 3);
        assert_eq!(strategy.long_period(), 5);
    }
}
