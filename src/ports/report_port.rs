//! Report generation port trait.

use std::io::Write;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::BacktestError;

/// Port for rendering backtest results.
pub trait ReportPort {
    fn write(&self, result: &BacktestResult, out: &mut dyn Write) -> Result<(), BacktestError>;

    /// Default implementation: one `write` per result, in order.
    fn write_comparison(
        &self,
        results: &[BacktestResult],
        out: &mut dyn Write,
    ) -> Result<(), BacktestError> {
        for result in results {
            self.write(result, out)?;
        }
        Ok(())
    }
}
