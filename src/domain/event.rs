//! Diagnostic events emitted while loading data and executing signals.
//!
//! The domain never writes to a console or logger itself. Anything worth
//! reporting is handed to the caller's [`EventSink`](crate::ports::event_port::EventSink).

use std::fmt;

use super::error::{RowParseError, TradeRejection};
use super::trade::{Side, Trade};

#[derive(Debug, Clone, PartialEq)]
pub enum BacktestEvent {
    /// A data row was discarded. `line` is 1-based and counts the header.
    RowSkipped {
        line: u64,
        content: String,
        error: RowParseError,
    },
    /// A bar carries a timestamp earlier than the bar before it.
    BarOutOfOrder {
        index: usize,
        timestamp: f64,
        previous: f64,
    },
    TradeExecuted { trade: Trade },
    TradeRejected {
        day_index: usize,
        rejection: TradeRejection,
    },
}

impl BacktestEvent {
    /// Warnings are events where input or an order was dropped.
    pub fn is_warning(&self) -> bool {
        !matches!(self, BacktestEvent::TradeExecuted { .. })
    }
}

impl fmt::Display for BacktestEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BacktestEvent::RowSkipped {
                line,
                content,
                error,
            } => write!(f, "could not parse line {line} ({error}): {content}"),
            BacktestEvent::BarOutOfOrder {
                index,
                timestamp,
                previous,
            } => write!(
                f,
                "bar {index} has timestamp {timestamp} before previous {previous}"
            ),
            BacktestEvent::TradeExecuted { trade } => {
                let what = match trade.side() {
                    Side::Buy => "cost",
                    Side::Sell => "proceeds",
                };
                write!(
                    f,
                    "Day {}: {} {} shares at ${:.2} ({}: ${:.2})",
                    trade.day_index(),
                    trade.side(),
                    trade.quantity(),
                    trade.price(),
                    what,
                    trade.total_value()
                )
            }
            BacktestEvent::TradeRejected {
                day_index,
                rejection,
            } => write!(f, "Day {day_index}: {rejection}"),
        }
    }
}
