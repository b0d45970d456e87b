#![allow(dead_code)]

use barreplay::domain::error::BacktestError;
pub use barreplay::domain::ohlcv::Bar;
use barreplay::domain::series::BarSeries;
use barreplay::ports::data_port::DataPort;
use barreplay::ports::event_port::EventSink;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const CSV_HEADER: &str = "timestamp,open,high,low,close,volume";

pub struct MockDataPort {
    pub bars: Vec<Bar>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            bars: Vec::new(),
            error: None,
        }
    }

    pub fn with_bars(mut self, bars: Vec<Bar>) -> Self {
        self.bars = bars;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn read_bars(&self, _sink: &dyn EventSink) -> Result<Vec<Bar>, BacktestError> {
        if let Some(reason) = &self.error {
            return Err(BacktestError::SourceUnavailable {
                path: self.describe(),
                reason: reason.clone(),
            });
        }
        Ok(self.bars.clone())
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

/// A flat bar whose open, high, low and close all equal `close`.
pub fn make_bar(timestamp: f64, close: f64) -> Bar {
    Bar {
        timestamp,
        open: close,
        high: close,
        low: close,
        close,
        volume: 1_000.0,
    }
}

pub fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(i as f64 + 1.0, close))
        .collect()
}

pub fn series_from_closes(closes: &[f64]) -> BarSeries {
    BarSeries::from_bars(bars_from_closes(closes))
}

/// CSV text with a header row and one flat bar per close.
pub fn csv_from_closes(closes: &[f64]) -> String {
    let mut content = format!("{CSV_HEADER}\n");
    for bar in bars_from_closes(closes) {
        content.push_str(&format!(
            "{},{},{},{},{},{}\n",
            bar.timestamp, bar.open, bar.high, bar.low, bar.close, bar.volume
        ));
    }
    content
}

/// Write `content` to `name` inside a fresh temp dir. Keep the dir alive for
/// as long as the file is needed.
pub fn write_temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}
