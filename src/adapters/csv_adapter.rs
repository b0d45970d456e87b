//! CSV file data adapter.
//!
//! Expected layout: one header row, then `timestamp,open,high,low,close,volume`
//! with every field numeric. Empty lines carry no row and are passed over
//! without a `RowSkipped` event.

use crate::domain::error::{BacktestError, RowParseError};
use crate::domain::event::BacktestEvent;
use crate::domain::ohlcv::Bar;
use crate::ports::data_port::DataPort;
use crate::ports::event_port::EventSink;
use csv::StringRecord;
use std::path::PathBuf;

const FIELDS: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Parse one data row into a bar.
pub fn parse_record(record: &StringRecord) -> Result<Bar, RowParseError> {
    if record.len() != FIELDS.len() {
        return Err(RowParseError::FieldCount {
            expected: FIELDS.len(),
            found: record.len(),
        });
    }

    let mut values = [0.0_f64; 6];
    for (i, (token, field)) in record.iter().zip(FIELDS).enumerate() {
        values[i] = token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| RowParseError::InvalidNumber {
                field,
                token: token.to_string(),
            })?;
    }

    let [timestamp, open, high, low, close, volume] = values;
    Ok(Bar {
        timestamp,
        open,
        high,
        low,
        close,
        volume,
    })
}

impl DataPort for CsvAdapter {
    fn read_bars(&self, sink: &dyn EventSink) -> Result<Vec<Bar>, BacktestError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| BacktestError::SourceUnavailable {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        let mut bars = Vec::new();
        let mut record = StringRecord::new();

        loop {
            match rdr.read_record(&mut record) {
                Ok(false) => break,
                Ok(true) => match parse_record(&record) {
                    Ok(bar) => bars.push(bar),
                    Err(error) => sink.emit(&BacktestEvent::RowSkipped {
                        line: record.position().map(|p| p.line()).unwrap_or(0),
                        content: record.iter().collect::<Vec<_>>().join(","),
                        error,
                    }),
                },
                Err(e) => {
                    if let csv::ErrorKind::Io(_) = e.kind() {
                        return Err(BacktestError::SourceUnavailable {
                            path: self.path.display().to_string(),
                            reason: e.to_string(),
                        });
                    }
                    sink.emit(&BacktestEvent::RowSkipped {
                        line: e.position().map(|p| p.line()).unwrap_or(0),
                        content: String::new(),
                        error: RowParseError::Malformed {
                            reason: e.to_string(),
                        },
                    });
                }
            }
        }

        Ok(bars)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
