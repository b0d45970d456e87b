//! Plain-text report adapter implementing ReportPort.
//!
//! Renders:
//! - A portfolio summary block per strategy
//! - An optional trade log
//! - A side-by-side comparison table when several strategies ran

use std::io::Write;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::BacktestError;
use crate::domain::metrics::Summary;
use crate::domain::trade::Trade;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Default, Clone, Copy)]
pub struct TextReport {
    pub include_trades: bool,
}

impl TextReport {
    pub fn new(include_trades: bool) -> Self {
        Self { include_trades }
    }
}

pub fn format_summary(summary: &Summary) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n=== {} ===\n", summary.strategy_name));
    out.push_str(&format!("Starting Value:   ${:.2}\n", summary.starting_value));
    out.push_str(&format!("Cash:             ${:.2}\n", summary.cash));
    out.push_str(&format!("Position:         {} shares\n", summary.position_shares));
    out.push_str(&format!("Position Value:   ${:.2}\n", summary.position_value));
    out.push_str(&format!("Total Value:      ${:.2}\n", summary.total_value));
    out.push_str(&format!("Total Return:     {:.2}%\n", summary.return_pct));
    out.push_str(&format!(
        "Total Trades:     {} ({} buys, {} sells)\n",
        summary.total_trades, summary.buy_trades, summary.sell_trades
    ));
    out.push_str(&format!("Realized P&L:     ${:.2}\n", summary.realized_pnl));
    if summary.position_shares != 0 {
        out.push_str(&format!("Unrealized P&L:   ${:.2}\n", summary.unrealized_pnl));
    }
    out.push_str(&format!("Win Rate:         {:.1}%\n", summary.win_rate * 100.0));
    out.push_str(&format!(
        "Max Drawdown:     -{:.1}% over {} bars\n",
        summary.max_drawdown * 100.0,
        summary.max_drawdown_duration
    ));
    out
}

pub fn format_trade_log(trades: &[Trade]) -> String {
    if trades.is_empty() {
        return "  (no trades)\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "  {:>6}  {:<4}  {:>8}  {:>12}  {:>14}\n",
        "Day", "Side", "Qty", "Price", "Value"
    ));
    for trade in trades {
        out.push_str(&format!(
            "  {:>6}  {:<4}  {:>8}  {:>12.2}  {:>14.2}\n",
            trade.day_index(),
            trade.side(),
            trade.quantity(),
            trade.price(),
            trade.total_value()
        ));
    }
    out
}

pub fn format_comparison(summaries: &[Summary]) -> String {
    let name_width = summaries
        .iter()
        .map(|s| s.strategy_name.len())
        .max()
        .unwrap_or(0)
        .max("Strategy".len());

    let mut out = String::new();
    out.push_str("\n=== Comparison ===\n");
    out.push_str(&format!(
        "{:<w$}  {:>14}  {:>9}  {:>6}  {:>8}\n",
        "Strategy",
        "Total Value",
        "Return",
        "Trades",
        "Max DD",
        w = name_width
    ));
    for s in summaries {
        out.push_str(&format!(
            "{:<w$}  {:>14.2}  {:>8.2}%  {:>6}  {:>7.1}%\n",
            s.strategy_name,
            s.total_value,
            s.return_pct,
            s.total_trades,
            s.max_drawdown * 100.0,
            w = name_width
        ));
    }

    if let Some(best) = summaries
        .iter()
        .max_by(|a, b| a.return_pct.total_cmp(&b.return_pct))
    {
        out.push_str(&format!("Best: {}\n", best.strategy_name));
    }
    out
}

impl ReportPort for TextReport {
    fn write(&self, result: &BacktestResult, out: &mut dyn Write) -> Result<(), BacktestError> {
        let summary = Summary::compute(result);
        out.write_all(format_summary(&summary).as_bytes())?;
        if self.include_trades {
            out.write_all(b"Trades:\n")?;
            out.write_all(format_trade_log(result.portfolio.trade_history()).as_bytes())?;
        }
        Ok(())
    }

    fn write_comparison(
        &self,
        results: &[BacktestResult],
        out: &mut dyn Write,
    ) -> Result<(), BacktestError> {
        for result in results {
            self.write(result, out)?;
        }
        let summaries: Vec<Summary> = results.iter().map(Summary::compute).collect();
        out.write_all(format_comparison(&summaries).as_bytes())?;
        Ok(())
    }
}
