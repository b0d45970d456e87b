//! Event sinks: forward to the `log` facade, or record in memory.

use std::cell::RefCell;

use log::{info, warn};

use crate::domain::event::BacktestEvent;
use crate::ports::event_port::EventSink;

/// Writes each event as one log record under the `barreplay` target.
/// Dropped rows and refused orders are warnings; fills are info.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: &BacktestEvent) {
        if event.is_warning() {
            warn!(target: "barreplay", "{event}");
        } else {
            info!(target: "barreplay", "{event}");
        }
    }
}

/// Keeps every event in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<BacktestEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BacktestEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.events.borrow().iter().filter(|e| e.is_warning()).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &BacktestEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Sends every event to both sinks.
pub struct Tee<A, B>(pub A, pub B);

impl<A: EventSink, B: EventSink> EventSink for Tee<A, B> {
    fn emit(&self, event: &BacktestEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::TradeRejection;
    use crate::domain::trade::{Side, Trade};

    fn executed() -> BacktestEvent {
        BacktestEvent::TradeExecuted {
            trade: Trade::new(Side::Buy, 1, 10.0, 0),
        }
    }

    fn rejected() -> BacktestEvent {
        BacktestEvent::TradeRejected {
            day_index: 1,
            rejection: TradeRejection::InvalidOrderQuantity { quantity: 0 },
        }
    }

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());
        sink.emit(&executed());
        sink.emit(&rejected());

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.events(), vec![executed(), rejected()]);
        assert_eq!(sink.warning_count(), 1);
    }

    #[test]
    fn tee_feeds_both() {
        let a = RecordingSink::new();
        let b = RecordingSink::new();
        let tee = Tee(&a, &b);
        tee.emit(&executed());
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn log_sink_accepts_all_events() {
        // no logger installed: records are discarded by the facade
        LogSink.emit(&executed());
        LogSink.emit(&rejected());
    }
}
