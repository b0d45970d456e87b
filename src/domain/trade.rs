//! Executed transaction records.

use std::fmt;

use super::signal::Signal;

/// Direction of an executed trade. Hold never produces a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl From<Side> for Signal {
    fn from(side: Side) -> Self {
        match side {
            Side::Buy => Signal::Buy,
            Side::Sell => Signal::Sell,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Signal::from(*self).fmt(f)
    }
}

/// Immutable record of one fill, created by the portfolio at execution time.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    side: Side,
    quantity: i64,
    price: f64,
    day_index: usize,
}

impl Trade {
    pub fn new(side: Side, quantity: i64, price: f64, day_index: usize) -> Self {
        Trade {
            side,
            quantity,
            price,
            day_index,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn signal(&self) -> Signal {
        self.side.into()
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn day_index(&self) -> usize {
        self.day_index
    }

    /// price * quantity
    pub fn total_value(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_fields() {
        let trade = Trade::new(Side::Buy, 50, 100.0, 4);
        assert_eq!(trade.side(), Side::Buy);
        assert_eq!(trade.signal(), Signal::Buy);
        assert_eq!(trade.quantity(), 50);
        assert!((trade.price() - 100.0).abs() < f64::EPSILON);
        assert_eq!(trade.day_index(), 4);
    }

    #[test]
    fn total_value() {
        let trade = Trade::new(Side::Sell, 50, 120.0, 9);
        assert!((trade.total_value() - 6000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn side_display_matches_signal() {
        assert_eq!(Side::Buy.to_string(), "BUY");
        assert_eq!(Side::Sell.to_string(), "SELL");
    }
}
