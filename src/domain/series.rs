//! Time-ordered bar storage with bounds-checked, lookback-safe access.

use crate::domain::error::BacktestError;
use crate::domain::event::BacktestEvent;
use crate::domain::ohlcv::Bar;
use crate::ports::data_port::DataPort;
use crate::ports::event_port::EventSink;

/// Bars in insertion order, indexed from zero.
///
/// Built once by [`BarSeries::load`] or [`BarSeries::from_bars`] and read-only
/// for the rest of a run. Strategies only ever see [`BarSeries::history`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bars(bars: Vec<Bar>) -> Self {
        BarSeries { bars }
    }

    /// Replace the series with everything `port` yields and return the bar count.
    ///
    /// On error the previous content is kept. Bars whose timestamp goes
    /// backwards are kept as-is and reported as [`BacktestEvent::BarOutOfOrder`].
    pub fn load(&mut self, port: &dyn DataPort, sink: &dyn EventSink) -> Result<usize, BacktestError> {
        let bars = port.read_bars(sink)?;

        for (index, pair) in bars.windows(2).enumerate() {
            if pair[1].timestamp < pair[0].timestamp {
                sink.emit(&BacktestEvent::BarOutOfOrder {
                    index: index + 1,
                    timestamp: pair[1].timestamp,
                    previous: pair[0].timestamp,
                });
            }
        }

        self.bars = bars;
        Ok(self.bars.len())
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Same as [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Bar, BacktestError> {
        self.bars.get(index).ok_or(BacktestError::IndexOutOfRange {
            index,
            len: self.bars.len(),
        })
    }

    /// Bars `[0, index]`, the only data available when deciding at `index`.
    pub fn history(&self, index: usize) -> Result<&[Bar], BacktestError> {
        if index >= self.bars.len() {
            return Err(BacktestError::IndexOutOfRange {
                index,
                len: self.bars.len(),
            });
        }
        Ok(&self.bars[..=index])
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Index of the first bar whose timestamp is earlier than its predecessor's.
    pub fn first_out_of_order(&self) -> Option<usize> {
        self.bars
            .windows(2)
            .position(|w| w[1].timestamp < w[0].timestamp)
            .map(|i| i + 1)
    }
}

impl<'a> IntoIterator for &'a BarSeries {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}
