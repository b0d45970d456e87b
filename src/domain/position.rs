//! Single-instrument share inventory with average-cost basis.

use super::error::TradeRejection;

/// Long-only holding. `average_price` is zero whenever `shares` is zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Position {
    shares: i64,
    average_price: f64,
}

impl Position {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` shares bought at `price`, folding them into the average cost.
    pub fn buy_shares(&mut self, quantity: i64, price: f64) -> Result<(), TradeRejection> {
        if quantity <= 0 {
            return Err(TradeRejection::InvalidOrderQuantity { quantity });
        }

        if self.shares == 0 {
            self.shares = quantity;
            self.average_price = price;
        } else {
            // weighted with the share count from before this purchase
            let total_cost = self.shares as f64 * self.average_price + quantity as f64 * price;
            let total_shares = self.shares + quantity;
            self.average_price = total_cost / total_shares as f64;
            self.shares = total_shares;
        }
        Ok(())
    }

    /// Remove `quantity` shares. Selling does not move the average cost of what remains.
    pub fn sell_shares(&mut self, quantity: i64, _price: f64) -> Result<(), TradeRejection> {
        if quantity <= 0 {
            return Err(TradeRejection::InvalidOrderQuantity { quantity });
        }
        if quantity > self.shares {
            return Err(TradeRejection::InsufficientShares {
                requested: quantity,
                held: self.shares,
            });
        }

        self.shares -= quantity;
        if self.shares == 0 {
            self.average_price = 0.0;
        }
        Ok(())
    }

    pub fn shares(&self) -> i64 {
        self.shares
    }

    pub fn average_price(&self) -> f64 {
        self.average_price
    }

    pub fn is_flat(&self) -> bool {
        self.shares == 0
    }

    pub fn current_value(&self, price: f64) -> f64 {
        self.shares as f64 * price
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        if self.is_flat() {
            return 0.0;
        }
        (price - self.average_price) * self.shares as f64
    }

    /// Cost basis of the shares currently held.
    pub fn cost_basis(&self) -> f64 {
        self.shares as f64 * self.average_price
    }
}
