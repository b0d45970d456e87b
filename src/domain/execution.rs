//! Order sizing policy.
//!
//! Decides how many shares a Buy or Sell signal turns into. The default
//! policy spends half of the available cash on each buy (whole shares only)
//! and liquidates the whole position on each sell.

use super::error::{BacktestError, TradeRejection};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionPolicy {
    /// Fraction of current cash budgeted for a buy, in (0, 1].
    pub buy_cash_fraction: f64,
    /// Fraction of held shares sold on a sell, in (0, 1].
    pub sell_position_fraction: f64,
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        ExecutionPolicy {
            buy_cash_fraction: 0.5,
            sell_position_fraction: 1.0,
        }
    }
}

impl ExecutionPolicy {
    pub fn validate(&self) -> Result<(), BacktestError> {
        for (name, value) in [
            ("buy_cash_fraction", self.buy_cash_fraction),
            ("sell_position_fraction", self.sell_position_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(BacktestError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("{value} is outside (0, 1]"),
                });
            }
        }
        Ok(())
    }

    /// Whole shares affordable with the buy budget. Never partial: a budget
    /// below one share's price is refused outright.
    pub fn shares_to_buy(&self, cash: f64, price: f64) -> Result<i64, TradeRejection> {
        if !(price.is_finite() && price > 0.0) {
            return Err(TradeRejection::InvalidPrice { price });
        }

        let budget = cash * self.buy_cash_fraction;
        if budget < price {
            return Err(TradeRejection::InsufficientFunds {
                needed: price,
                available: budget,
            });
        }

        // never more than the cash on hand can pay for, whatever the fraction
        let mut quantity = (budget / price).floor().min((cash / price).floor()) as i64;
        if quantity as f64 * price > cash {
            quantity -= 1;
        }
        if quantity <= 0 {
            return Err(TradeRejection::InsufficientFunds {
                needed: price,
                available: budget,
            });
        }
        Ok(quantity)
    }

    pub fn shares_to_sell(&self, held: i64) -> Result<i64, TradeRejection> {
        let quantity = (held as f64 * self.sell_position_fraction).floor() as i64;
        if held <= 0 || quantity <= 0 {
            return Err(TradeRejection::InsufficientShares {
                requested: quantity,
                held,
            });
        }
        Ok(quantity.min(held))
    }
}
