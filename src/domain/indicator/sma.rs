//! Simple moving average of closing prices.
//!
//! Formula: SMA = sum(close[i-n+1..=i]) / n
//!
//! Warmup: fewer than n bars of history yields `None`. A genuine average of
//! 0.0 is a value like any other.

use crate::domain::ohlcv::Bar;

pub fn simple_moving_average(history: &[Bar], period: usize) -> Option<f64> {
    if period == 0 || history.len() < period {
        return None;
    }

    let window = &history[history.len() - period..];
    let sum: f64 = window.iter().map(|b| b.close).sum();
    Some(sum / period as f64)
}
