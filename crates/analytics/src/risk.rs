// In crates/analytics/src/risk.rs

use crate::types::{DailyPerformance, RiskMetrics, SummaryMetrics};
use core_types::Trade;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// Trading days used to annualize the daily Sharpe ratio.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Sortino is reported as a fixed multiple of Sharpe.
pub const SORTINO_TO_SHARPE: f64 = 1.2;

/// Risk of ruin reported when the edge ratio shows no edge.
pub const NO_EDGE_RISK_OF_RUIN: f64 = 95.0;

/// Derives drawdown extremes, loss streaks and risk ratios.
///
/// `daily` must be the series built from the same `trades`, and `summary`
/// the summary of that set. The loss streak walks `trades` in the order given.
pub fn calculate_risk(
    trades: &[Trade],
    daily: &[DailyPerformance],
    summary: &SummaryMetrics,
) -> RiskMetrics {
    let mut risk = RiskMetrics::new();

    // --- Drawdown ---
    for row in daily {
        if row.drawdown > risk.max_drawdown {
            risk.max_drawdown = row.drawdown;
            risk.max_drawdown_percentage = drawdown_percentage(row.drawdown, row.high_water_mark);
        }
    }
    if let Some(last) = daily.last() {
        risk.current_drawdown = last.drawdown;
        risk.current_drawdown_percentage = drawdown_percentage(last.drawdown, last.high_water_mark);
    }

    // --- Losing streaks ---
    let (current, longest) = loss_streaks(trades);
    risk.consecutive_losses = current;
    risk.max_consecutive_losses = longest;

    // --- Ratios ---
    let returns: Vec<f64> = daily
        .iter()
        .map(|row| row.pnl.to_f64().unwrap_or(0.0))
        .collect();
    risk.sharpe_ratio = sharpe_ratio(&returns);
    risk.sortino_ratio = risk.sharpe_ratio * SORTINO_TO_SHARPE;
    if risk.max_drawdown > dec!(0) {
        risk.calmar_ratio = (summary.total_pnl / risk.max_drawdown).to_f64().unwrap_or(0.0);
    }

    risk.risk_of_ruin = risk_of_ruin(
        summary.win_rate / 100.0,
        summary.average_win.to_f64().unwrap_or(0.0),
        summary.average_loss.to_f64().unwrap_or(0.0),
    );

    risk
}

fn drawdown_percentage(drawdown: Decimal, high_water_mark: Decimal) -> f64 {
    if high_water_mark > dec!(0) {
        (drawdown / high_water_mark).to_f64().unwrap_or(0.0) * 100.0
    } else {
        0.0
    }
}

/// Returns `(current, longest)` runs of trades with `pnl < 0`.
pub fn loss_streaks(trades: &[Trade]) -> (u32, u32) {
    let mut current = 0;
    let mut longest = 0;
    for trade in trades {
        if trade.pnl < dec!(0) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    (current, longest)
}

/// Annualized Sharpe ratio of daily returns, using the population standard deviation.
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    if std_dev > 0.0 {
        mean / std_dev * TRADING_DAYS_PER_YEAR.sqrt()
    } else {
        0.0
    }
}

/// Edge-ratio approximation of the probability of ruin, in percent.
///
/// `win_rate` is a fraction in `[0, 1]`. Without an average loss there is no
/// ratio to speak of and the result is 0.
pub fn risk_of_ruin(win_rate: f64, average_win: f64, average_loss: f64) -> f64 {
    let loss_weight = (1.0 - win_rate) * average_loss;
    if average_loss == 0.0 || loss_weight <= 0.0 {
        return 0.0;
    }

    let edge_ratio = (win_rate * average_win) / loss_weight;
    if edge_ratio <= 1.0 {
        return NO_EDGE_RISK_OF_RUIN;
    }
    (100.0 / edge_ratio.powi(2)).clamp(0.0, 100.0)
}
