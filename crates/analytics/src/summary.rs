// In crates/analytics/src/summary.rs

use crate::types::SummaryMetrics;
use core_types::{Side, Trade};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// Computes win/loss, volume and fee statistics over a filtered trade set.
///
/// Winners are trades with `pnl > 0`; everything else, including flat
/// trades, counts as a loser.
pub fn summarize(trades: &[Trade]) -> SummaryMetrics {
    let mut summary = SummaryMetrics::new();
    if trades.is_empty() {
        return summary;
    }

    let winners: Vec<&Trade> = trades.iter().filter(|t| t.pnl > dec!(0)).collect();
    let losers: Vec<&Trade> = trades.iter().filter(|t| t.pnl <= dec!(0)).collect();

    summary.total_trades = trades.len() as u32;
    summary.winning_trades = winners.len() as u32;
    summary.losing_trades = losers.len() as u32;

    // --- Profit & loss ---
    summary.gross_profit = winners.iter().map(|t| t.pnl).sum();
    summary.gross_loss = losers.iter().map(|t| t.pnl).sum::<Decimal>().abs();
    summary.total_pnl = summary.gross_profit - summary.gross_loss;

    summary.win_rate = summary.winning_trades as f64 / summary.total_trades as f64 * 100.0;
    summary.profit_factor = profit_factor(summary.gross_profit, summary.gross_loss);

    if !winners.is_empty() {
        summary.average_win = summary.gross_profit / Decimal::from(winners.len());
    }
    if !losers.is_empty() {
        summary.average_loss = summary.gross_loss / Decimal::from(losers.len());
    }
    summary.largest_win = winners.iter().map(|t| t.pnl).max().unwrap_or(dec!(0));
    summary.largest_loss = losers.iter().map(|t| t.pnl).min().unwrap_or(dec!(0));

    // Probability-weighted average outcome of one trade.
    let win_fraction = Decimal::from(winners.len()) / Decimal::from(trades.len());
    summary.expectancy =
        win_fraction * summary.average_win - (dec!(1) - win_fraction) * summary.average_loss;

    // --- Activity ---
    let total_duration_ms: i64 = trades.iter().map(|t| t.duration_ms).sum();
    summary.average_trade_duration_ms = total_duration_ms as f64 / trades.len() as f64;

    summary.total_volume = trades.iter().map(Trade::volume).sum();
    summary.total_fees = trades.iter().map(|t| t.fees).sum();
    if summary.total_volume > dec!(0) {
        summary.total_pnl_percentage = (summary.total_pnl / summary.total_volume)
            .to_f64()
            .unwrap_or(0.0)
            * 100.0;
    }

    // --- Directional split ---
    summary.long_trades = trades.iter().filter(|t| t.side == Side::Long).count() as u32;
    summary.short_trades = trades.iter().filter(|t| t.side == Side::Short).count() as u32;
    summary.long_percentage = summary.long_trades as f64 / summary.total_trades as f64 * 100.0;
    summary.short_percentage = summary.short_trades as f64 / summary.total_trades as f64 * 100.0;

    summary
}

/// Gross profit over gross loss.
///
/// Pure profit yields `f64::INFINITY`; no profit and no loss yields 0.
pub fn profit_factor(gross_profit: Decimal, gross_loss: Decimal) -> f64 {
    if gross_loss > dec!(0) {
        (gross_profit / gross_loss).to_f64().unwrap_or(0.0)
    } else if gross_profit > dec!(0) {
        f64::INFINITY
    } else {
        0.0
    }
}
