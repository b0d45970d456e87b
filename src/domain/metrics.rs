//! End-of-run performance summary.

use super::backtest::BacktestResult;
use super::portfolio::EquityPoint;
use super::trade::Side;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub strategy_name: String,
    pub starting_value: f64,
    pub cash: f64,
    pub position_shares: i64,
    pub position_value: f64,
    pub total_value: f64,
    pub return_pct: f64,
    pub total_trades: usize,
    pub buy_trades: usize,
    pub sell_trades: usize,
    pub unrealized_pnl: f64,
    pub realized_pnl: f64,
    /// Largest peak-to-trough fall of the equity curve, as a fraction of the peak.
    pub max_drawdown: f64,
    /// Bars spent in the longest drawdown.
    pub max_drawdown_duration: usize,
    /// Winning sells over all sells; 0 when nothing was sold.
    pub win_rate: f64,
}

impl Summary {
    pub fn compute(result: &BacktestResult) -> Self {
        let portfolio = &result.portfolio;
        let price = result.final_price;
        let trades = portfolio.trade_history();

        let buy_trades = trades.iter().filter(|t| t.side() == Side::Buy).count();
        let sell_trades = trades.len() - buy_trades;

        let win_rate = if sell_trades > 0 {
            portfolio.winning_sells() as f64 / sell_trades as f64
        } else {
            0.0
        };

        let (max_drawdown, max_drawdown_duration) = compute_drawdown(portfolio.equity_curve());

        Summary {
            strategy_name: result.strategy_name.clone(),
            starting_value: portfolio.starting_cash(),
            cash: portfolio.cash(),
            position_shares: portfolio.position().shares(),
            position_value: portfolio.position().current_value(price),
            total_value: portfolio.total_value(price),
            return_pct: portfolio.return_pct(price),
            total_trades: trades.len(),
            buy_trades,
            sell_trades,
            unrealized_pnl: portfolio.position().unrealized_pnl(price),
            realized_pnl: portfolio.realized_pnl(),
            max_drawdown,
            max_drawdown_duration,
            win_rate,
        }
    }
}

fn compute_drawdown(equity_curve: &[EquityPoint]) -> (f64, usize) {
    let Some(first) = equity_curve.first() else {
        return (0.0, 0);
    };

    let mut peak = first.equity;
    let mut max_dd = 0.0_f64;
    let mut max_dd_duration = 0usize;
    let mut current_dd_duration = 0usize;

    for point in equity_curve {
        if point.equity >= peak {
            peak = point.equity;
            current_dd_duration = 0;
        } else if peak > 0.0 {
            let dd = (peak - point.equity) / peak;
            max_dd = max_dd.max(dd);
            current_dd_duration += 1;
            max_dd_duration = max_dd_duration.max(current_dd_duration);
        }
    }

    (max_dd, max_dd_duration)
}
