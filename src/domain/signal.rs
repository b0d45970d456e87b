//! Trade decision emitted by a strategy for a single bar.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Buy,
    Hold,
    Sell,
}

impl Signal {
    /// Buy and Sell ask the portfolio to act; Hold never does.
    pub fn is_trade(self) -> bool {
        !matches!(self, Signal::Hold)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Signal::Buy => "BUY",
            Signal::Hold => "HOLD",
            Signal::Sell => "SELL",
        };
        f.pad(label)
    }
}
