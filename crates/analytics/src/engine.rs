use crate::calendar::{calendar_days, calendar_stats, monthly_breakdown};
use crate::daily::daily_performance;
use crate::risk::calculate_risk;
use crate::summary::summarize;
use crate::types::AnalyticsReport;
use core_types::Trade;

/// The engine responsible for deriving every dashboard figure from trade data.
#[derive(Debug, Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates a full report from an already filtered set of closed trades.
    ///
    /// Each aggregator reads the same input and none of them mutates it, so
    /// the report is a deterministic function of `trades`.
    pub fn calculate(&self, trades: &[Trade]) -> AnalyticsReport {
        if trades.is_empty() {
            return AnalyticsReport::default();
        }

        let summary = summarize(trades);
        let daily = daily_performance(trades);
        let risk = calculate_risk(trades, &daily, &summary);
        let calendar = calendar_days(trades);
        let calendar_stats = calendar_stats(&calendar);
        let monthly = monthly_breakdown(&calendar);

        tracing::debug!(
            trades = summary.total_trades,
            days = daily.len(),
            net_pnl = %summary.total_pnl,
            max_drawdown = %risk.max_drawdown,
            "Analytics report calculated"
        );

        AnalyticsReport {
            summary,
            daily,
            risk,
            calendar,
            calendar_stats,
            monthly,
        }
    }
}
