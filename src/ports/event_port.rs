//! Diagnostic event sink port.

use crate::domain::event::BacktestEvent;

/// Receives diagnostics from loading and execution. Implementations decide
/// where they go (log records, an in-memory buffer, nowhere).
pub trait EventSink {
    fn emit(&self, event: &BacktestEvent);
}

/// The unit sink discards every event.
impl EventSink for () {
    fn emit(&self, _event: &BacktestEvent) {}
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn emit(&self, event: &BacktestEvent) {
        (**self).emit(event)
    }
}
