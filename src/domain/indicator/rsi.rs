//! RSI (Relative Strength Index) over a fixed lookback window.
//!
//! Uses plain averages of the last n close-to-close changes, not Wilder's
//! smoothing:
//! - avg_gain = sum(positive changes) / n
//! - avg_loss = sum(|negative changes|) / n
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//!
//! Warmup: n changes need n + 1 bars; fewer yields `None`.

use crate::domain::ohlcv::Bar;

pub fn relative_strength_index(history: &[Bar], period: usize) -> Option<f64> {
    if period == 0 || history.len() <= period {
        return None;
    }

    let window = &history[history.len() - period - 1..];
    let (total_gain, total_loss) = window.windows(2).fold((0.0, 0.0), |(gain, loss), w| {
        let change = w[1].close - w[0].close;
        if change > 0.0 {
            (gain + change, loss)
        } else {
            (gain, loss - change)
        }
    });

    let avg_gain = total_gain / period as f64;
    let avg_loss = total_loss / period as f64;

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}
