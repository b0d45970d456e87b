//! Backtest driver: replays a series bar by bar through a strategy.
//!
//! [`BacktestConfig`] defines the starting capital and order sizing.

use super::error::BacktestError;
use super::execution::ExecutionPolicy;
use super::portfolio::Portfolio;
use super::series::BarSeries;
use super::signal::Signal;
use super::strategy::Strategy;
use crate::ports::event_port::EventSink;

pub const DEFAULT_STARTING_CASH: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub starting_cash: f64,
    pub policy: ExecutionPolicy,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            starting_cash: DEFAULT_STARTING_CASH,
            policy: ExecutionPolicy::default(),
        }
    }
}

/// How many of each signal the strategy produced over the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalCounts {
    pub buy: usize,
    pub hold: usize,
    pub sell: usize,
}

impl SignalCounts {
    fn record(&mut self, signal: Signal) {
        match signal {
            Signal::Buy => self.buy += 1,
            Signal::Hold => self.hold += 1,
            Signal::Sell => self.sell += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.buy + self.hold + self.sell
    }
}

#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub strategy_name: String,
    pub portfolio: Portfolio,
    /// Close of the last bar, used to mark the final position to market.
    pub final_price: f64,
    pub signals: SignalCounts,
}

impl BacktestResult {
    pub fn total_value(&self) -> f64 {
        self.portfolio.total_value(self.final_price)
    }

    pub fn return_pct(&self) -> f64 {
        self.portfolio.return_pct(self.final_price)
    }
}

/// Run `strategy` over every bar of `series` against a fresh portfolio.
///
/// Each bar's signal is executed at that bar's close, then equity is marked
/// at the same close.
pub fn run_backtest(
    series: &BarSeries,
    strategy: &dyn Strategy,
    config: &BacktestConfig,
    sink: &dyn EventSink,
) -> Result<BacktestResult, BacktestError> {
    if series.is_empty() {
        return Err(BacktestError::EmptySeries);
    }
    let mut portfolio = Portfolio::with_policy(config.starting_cash, config.policy)?;
    let mut signals = SignalCounts::default();

    for index in 0..series.len() {
        let signal = strategy.analyze(series, index)?;
        let close = series.get(index)?.close;
        signals.record(signal);
        portfolio.execute_signal(signal, close, index, sink);
        portfolio.record_equity(index, close);
    }

    let final_price = series.last().map(|b| b.close).ok_or(BacktestError::EmptySeries)?;

    Ok(BacktestResult {
        strategy_name: strategy.name(),
        portfolio,
        final_price,
        signals,
    })
}

/// Run each strategy over the same series, each with its own portfolio.
pub fn compare(
    series: &BarSeries,
    strategies: &[&dyn Strategy],
    config: &BacktestConfig,
    sink: &dyn EventSink,
) -> Result<Vec<BacktestResult>, BacktestError> {
    strategies
        .iter()
        .map(|strategy| run_backtest(series, *strategy, config, sink))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::Bar;
    use crate::domain::strategy::{MaCrossover, RsiStrategy};

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
    fn config_defaults() {
        let c = BacktestConfig::default();
        assert!((c.starting_cash - 10_000.0).abs() < f64::EPSILON);
        assert_eq!(c.policy, ExecutionPolicy::default());
    }

    #[test]
    fn empty_series_is_an_error() {
        let strategy = MaCrossover::new(3, 5).unwrap();
        let err = run_backtest(&BarSeries::new(), &strategy, &BacktestConfig::default(), &())
            .unwrap_err();
        assert!(matches!(err, BacktestError::EmptySeries));
    }

    #[test]
    fn invalid_starting_cash() {
        let strategy = MaCrossover::new(3, 5).unwrap();
        let config = BacktestConfig {
            starting_cash: 0.0,
            ..BacktestConfig::default()
        };
        let err = run_backtest(&series(&[1.0]), &strategy, &config, &()).unwrap_err();
        assert!(matches!(err, BacktestError::InvalidParameter { .. }));
    }

    #[test]
    fn crossover_run_buys_then_sells() {
        // SMA(2) vs SMA(3): rise then fall
        let s = series(&[10.0, 10.0, 10.0, 20.0, 20.0, 5.0]);
        let strategy = MaCrossover::new(2, 3).unwrap();
        let result = run_backtest(&s, &strategy, &BacktestConfig::default(), &()).unwrap();

        let trades = result.portfolio.trade_history();
        assert_eq!(trades.len(), 3);
        // index 3: SMA2=15 > SMA3=13.3 → buy 250 @20
        assert_eq!(trades[0].day_index(), 3);
        assert_eq!(trades[0].quantity(), 250);
        // index 4: SMA2=20 > SMA3=16.7 → buy 125 @20
        assert_eq!(trades[1].day_index(), 4);
        assert_eq!(trades[1].quantity(), 125);
        // index 5: SMA2=12.5 < SMA3=15 → sell 375 @5
        assert_eq!(trades[2].day_index(), 5);
        assert_eq!(trades[2].quantity(), 375);

        assert!(result.portfolio.position().is_flat());
        assert!((result.final_price - 5.0).abs() < f64::EPSILON);
        assert_eq!(result.signals.total(), 6);
        assert_eq!(result.signals.buy, 2);
        assert_eq!(result.signals.sell, 1);
        assert_eq!(result.portfolio.equity_curve().len(), 6);
    }

    #[test]
    fn compare_uses_independent_portfolios() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let s = series(&closes);
        let ma = MaCrossover::new(3, 5).unwrap();
        let rsi = RsiStrategy::new(14).unwrap();

        let results = compare(&s, &[&ma, &rsi], &BacktestConfig::default(), &()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].strategy_name, "SMA(3)/SMA(5) crossover");
        assert_eq!(results[1].strategy_name, "RSI(14) 30/70");

        let alone = run_backtest(&s, &rsi, &BacktestConfig::default(), &()).unwrap();
        assert_eq!(results[1].portfolio, alone.portfolio);
    }
}
