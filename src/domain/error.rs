//! Domain error types.
//!
//! Three tiers: [`BacktestError`] is fatal to the call that returns it,
//! [`RowParseError`] is recoverable (the row is skipped and loading continues),
//! and [`TradeRejection`] is a business-rule refusal that leaves state untouched.

/// A single input row that could not be turned into a bar.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowParseError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid {field} value {token:?}")]
    InvalidNumber { field: &'static str, token: String },

    #[error("malformed row: {reason}")]
    Malformed { reason: String },
}

/// Why an order was refused. The portfolio and position are unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TradeRejection {
    #[error("cannot trade {quantity} shares")]
    InvalidOrderQuantity { quantity: i64 },

    #[error("invalid execution price {price}")]
    InvalidPrice { price: f64 },

    #[error("not enough cash to buy (need ${needed:.2}, have ${available:.2})")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("cannot sell {requested} shares, only own {held}")]
    InsufficientShares { requested: i64, held: i64 },
}

/// Top-level error type for barreplay.
#[derive(Debug, thiserror::Error)]
pub enum BacktestError {
    #[error("cannot open data source {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },

    #[error("bar index {index} out of range (series has {len} bars)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("bar series is empty")]
    EmptySeries,

    #[error("bars are not in chronological order at index {index}")]
    UnorderedData { index: usize },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&BacktestError> for std::process::ExitCode {
    fn from(err: &BacktestError) -> Self {
        let code: u8 = match err {
            BacktestError::Io(_) | BacktestError::IndexOutOfRange { .. } => 1,
            BacktestError::ConfigParse { .. }
            | BacktestError::ConfigMissing { .. }
            | BacktestError::ConfigInvalid { .. } => 2,
            BacktestError::InvalidParameter { .. } => 4,
            BacktestError::SourceUnavailable { .. }
            | BacktestError::EmptySeries
            | BacktestError::UnorderedData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_parse_error_messages() {
        let err = RowParseError::FieldCount {
            expected: 6,
            found: 4,
        };
        assert_eq!(err.to_string(), "expected 6 fields, found 4");

        let err = RowParseError::InvalidNumber {
            field: "close",
            token: "abc".into(),
        };
        assert_eq!(err.to_string(), "invalid close value \"abc\"");
    }

    #[test]
    fn trade_rejection_messages() {
        let err = TradeRejection::InsufficientFunds {
            needed: 100.0,
            available: 49.5,
        };
        assert_eq!(
            err.to_string(),
            "not enough cash to buy (need $100.00, have $49.50)"
        );

        let err = TradeRejection::InsufficientShares {
            requested: 10,
            held: 3,
        };
        assert_eq!(err.to_string(), "cannot sell 10 shares, only own 3");
    }

    #[test]
    fn index_out_of_range_message() {
        let err = BacktestError::IndexOutOfRange { index: 7, len: 5 };
        assert_eq!(
            err.to_string(),
            "bar index 7 out of range (series has 5 bars)"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: BacktestError = io.into();
        assert!(matches!(err, BacktestError::Io(_)));
    }
}
