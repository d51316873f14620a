use analytics::{
    available_symbols, filter_trades, AnalyticsEngine, CalendarDay, CalendarStats, DailyPerformance,
    DateRange, MonthlySummary, RiskMetrics, SummaryMetrics, SymbolFilter,
};
use chrono::{DateTime, Utc};
use core_types::{Symbol, Trade};
use serde::Serialize;

/// The inputs every dashboard figure is derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// The full, unfiltered trade collection.
    pub all_trades: Vec<Trade>,
    pub date_range: DateRange,
    pub symbol_filter: SymbolFilter,
}

/// Everything presentation reads, recomputed wholesale from a `DashboardState`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// The filtered trades, in their original order.
    pub trades: Vec<Trade>,
    pub summary: SummaryMetrics,
    pub daily: Vec<DailyPerformance>,
    pub risk: RiskMetrics,
    pub calendar: Vec<CalendarDay>,
    pub calendar_stats: CalendarStats,
    pub monthly: Vec<MonthlySummary>,
    /// Distinct symbols of the full trade set, so the selector can always
    /// switch back to an instrument that is currently filtered out.
    pub available_symbols: Vec<Symbol>,
}

/// Filters once and runs every aggregator on the result.
pub fn recompute(state: &DashboardState, now: DateTime<Utc>) -> DashboardSnapshot {
    let trades = filter_trades(&state.all_trades, state.date_range, &state.symbol_filter, now);
    let report = AnalyticsEngine::new().calculate(&trades);

    tracing::debug!(
        total = state.all_trades.len(),
        filtered = trades.len(),
        range = %state.date_range,
        symbol = %state.symbol_filter,
        "Dashboard recomputed"
    );

    DashboardSnapshot {
        available_symbols: available_symbols(&state.all_trades),
        trades,
        summary: report.summary,
        daily: report.daily,
        risk: report.risk,
        calendar: report.calendar,
        calendar_stats: report.calendar_stats,
        monthly: report.monthly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use core_types::{Side, TradeStatus};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 15, 12, 0, 0).unwrap()
    }

    fn trade(id: &str, symbol: &str, pnl: Decimal, days_ago: i64) -> Trade {
        let entry_time = now() - Duration::days(days_ago);
        Trade {
            id: id.to_string(),
            symbol: Symbol::from(symbol),
            side: Side::Long,
            status: TradeStatus::Closed,
            entry_price: dec!(1),
            exit_price: Some(dec!(1)),
            size: dec!(100),
            leverage: 1,
            pnl,
            pnl_percentage: pnl,
            fees: dec!(0),
            entry_time,
            exit_time: Some(entry_time + Duration::minutes(5)),
            duration_ms: 300_000,
        }
    }

    fn state() -> DashboardState {
        DashboardState {
            all_trades: vec![
                trade("a", "SOL-PERP", dec!(40), 1),
                trade("b", "JUP-PERP", dec!(-10), 3),
                trade("c", "SOL-PERP", dec!(-25), 45),
            ],
            ..DashboardState::default()
        }
    }

    #[test]
    fn unfiltered_snapshot_covers_everything() {
        let snapshot = recompute(&state(), now());
        assert_eq!(snapshot.trades, state().all_trades);
        assert_eq!(snapshot.summary.total_trades, 3);
        assert_eq!(snapshot.summary.total_pnl, dec!(5));
        assert_eq!(snapshot.daily.len(), 3);
        // July and August
        let months: Vec<_> = snapshot.monthly.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2024-08", "2024-07"]);
        assert_eq!(snapshot.calendar_stats.current_win_streak, 1);
    }

    #[test]
    fn symbols_come_from_the_full_set() {
        let mut state = state();
        state.symbol_filter = SymbolFilter::Only(Symbol::from("SOL-PERP"));
        state.date_range = DateRange::Last7Days;

        let snapshot = recompute(&state, now());
        let ids: Vec<_> = snapshot.trades.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
        assert_eq!(
            snapshot.available_symbols,
            vec![Symbol::from("JUP-PERP"), Symbol::from("SOL-PERP")]
        );
    }

    #[test]
    fn empty_state_gives_empty_snapshot() {
        assert_eq!(recompute(&DashboardState::default(), now()), DashboardSnapshot::default());
    }
}
