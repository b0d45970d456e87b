//! Cash ledger, position, and trade history for one backtest run.
//!
//! [`Portfolio::execute_signal`] is the only way state changes during a run.
//! Cash never goes negative: buys are sized from a fraction of the cash on
//! hand and a buy that cannot afford a single share is refused.

use super::error::{BacktestError, TradeRejection};
use super::event::BacktestEvent;
use super::execution::ExecutionPolicy;
use super::position::Position;
use super::signal::Signal;
use super::trade::{Side, Trade};
use crate::ports::event_port::EventSink;

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub day_index: usize,
    pub equity: f64,
}

/// What happened to a signal handed to the portfolio.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    Executed(Trade),
    Rejected(TradeRejection),
    Held,
}

impl ExecutionOutcome {
    pub fn trade(&self) -> Option<&Trade> {
        match self {
            ExecutionOutcome::Executed(trade) => Some(trade),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    cash: f64,
    starting_cash: f64,
    position: Position,
    trade_history: Vec<Trade>,
    equity_curve: Vec<EquityPoint>,
    policy: ExecutionPolicy,
    realized_pnl: f64,
    winning_sells: usize,
}

impl Portfolio {
    pub fn new(starting_cash: f64) -> Result<Self, BacktestError> {
        Self::with_policy(starting_cash, ExecutionPolicy::default())
    }

    /// Starting cash must be finite and positive; the policy must pass
    /// [`ExecutionPolicy::validate`].
    pub fn with_policy(starting_cash: f64, policy: ExecutionPolicy) -> Result<Self, BacktestError> {
        if !(starting_cash.is_finite() && starting_cash > 0.0) {
            return Err(BacktestError::InvalidParameter {
                name: "starting_cash".to_string(),
                reason: format!("{starting_cash} must be positive"),
            });
        }
        policy.validate()?;

        Ok(Portfolio {
            cash: starting_cash,
            starting_cash,
            position: Position::new(),
            trade_history: Vec::new(),
            equity_curve: Vec::new(),
            policy,
            realized_pnl: 0.0,
            winning_sells: 0,
        })
    }

    /// Turn `signal` into at most one trade at `price`.
    ///
    /// Executions and rejections are reported to `sink`; Hold is silent.
    pub fn execute_signal(
        &mut self,
        signal: Signal,
        price: f64,
        day_index: usize,
        sink: &dyn EventSink,
    ) -> ExecutionOutcome {
        let result = match signal {
            Signal::Hold => return ExecutionOutcome::Held,
            Signal::Buy => self.buy(price, day_index),
            Signal::Sell => self.sell(price, day_index),
        };

        match result {
            Ok(trade) => {
                sink.emit(&BacktestEvent::TradeExecuted {
                    trade: trade.clone(),
                });
                self.trade_history.push(trade.clone());
                ExecutionOutcome::Executed(trade)
            }
            Err(rejection) => {
                sink.emit(&BacktestEvent::TradeRejected {
                    day_index,
                    rejection: rejection.clone(),
                });
                ExecutionOutcome::Rejected(rejection)
            }
        }
    }

    fn buy(&mut self, price: f64, day_index: usize) -> Result<Trade, TradeRejection> {
        let quantity = self.policy.shares_to_buy(self.cash, price)?;
        let cost = quantity as f64 * price;

        self.position.buy_shares(quantity, price)?;
        self.cash -= cost;
        Ok(Trade::new(Side::Buy, quantity, price, day_index))
    }

    fn sell(&mut self, price: f64, day_index: usize) -> Result<Trade, TradeRejection> {
        if !(price.is_finite() && price > 0.0) {
            return Err(TradeRejection::InvalidPrice { price });
        }
        let quantity = self.policy.shares_to_sell(self.position.shares())?;
        let cost_price = self.position.average_price();

        self.position.sell_shares(quantity, price)?;
        self.cash += quantity as f64 * price;

        let pnl = (price - cost_price) * quantity as f64;
        self.realized_pnl += pnl;
        if pnl > 0.0 {
            self.winning_sells += 1;
        }
        Ok(Trade::new(Side::Sell, quantity, price, day_index))
    }

    /// Append the portfolio's mark-to-market value at `price`.
    pub fn record_equity(&mut self, day_index: usize, price: f64) {
        let equity = self.total_value(price);
        self.equity_curve.push(EquityPoint { day_index, equity });
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn starting_cash(&self) -> f64 {
        self.starting_cash
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn policy(&self) -> &ExecutionPolicy {
        &self.policy
    }

    pub fn trade_history(&self) -> &[Trade] {
        &self.trade_history
    }

    pub fn equity_curve(&self) -> &[EquityPoint] {
        &self.equity_curve
    }

    /// Profit locked in by sells, measured against average cost.
    pub fn realized_pnl(&self) -> f64 {
        self.realized_pnl
    }

    /// Sells that closed above their average cost.
    pub fn winning_sells(&self) -> usize {
        self.winning_sells
    }

    pub fn total_value(&self, price: f64) -> f64 {
        self.cash + self.position.current_value(price)
    }

    /// Percentage gain over the starting cash, e.g. `12.5` for +12.5%.
    pub fn return_pct(&self, price: f64) -> f64 {
        (self.total_value(price) - self.starting_cash) / self.starting_cash * 100.0
    }
}
