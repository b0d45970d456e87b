//! Bar data source port.

use crate::domain::error::BacktestError;
use crate::domain::ohlcv::Bar;
use crate::ports::event_port::EventSink;

pub trait DataPort {
    /// Read every bar the source holds, in source order.
    ///
    /// Rows that cannot be parsed are reported to `sink` and skipped. Only a
    /// source that cannot be opened at all is an error.
    fn read_bars(&self, sink: &dyn EventSink) -> Result<Vec<Bar>, BacktestError>;

    /// Human-readable name of the source, used in diagnostics.
    fn describe(&self) -> String;
}
