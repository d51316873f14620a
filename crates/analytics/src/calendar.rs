use crate::types::{CalendarDay, CalendarStats, MonthlySummary};
use chrono::NaiveDate;
use core_types::Trade;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

/// Highest heat-map bucket.
pub const MAX_INTENSITY: u8 = 4;

/// Months kept by `monthly_breakdown`.
pub const MAX_MONTHS: usize = 6;

/// Buckets trades per entry day for the heat-map, in ascending date order.
///
/// Intensity is the day's absolute PnL relative to the largest absolute day
/// PnL in the set (never less than 1), scaled onto `0..=4`.
pub fn calendar_days(trades: &[Trade]) -> Vec<CalendarDay> {
    let mut days: BTreeMap<NaiveDate, (Decimal, u32)> = BTreeMap::new();
    for trade in trades {
        let (pnl, count) = days.entry(trade.day_key()).or_insert((dec!(0), 0));
        *pnl += trade.pnl;
        *count += 1;
    }

    let max_pnl = days
        .values()
        .map(|(pnl, _)| pnl.abs())
        .fold(dec!(1), Decimal::max);

    days.into_iter()
        .map(|(date, (pnl, trades))| CalendarDay {
            date,
            pnl,
            trades,
            is_profit: pnl >= dec!(0),
            intensity: intensity(pnl, max_pnl),
        })
        .collect()
}

fn intensity(pnl: Decimal, max_pnl: Decimal) -> u8 {
    let scaled = (pnl.abs() * dec!(5) / max_pnl).floor();
    scaled.to_u8().unwrap_or(MAX_INTENSITY).min(MAX_INTENSITY)
}

/// Counts profit and loss days and the day-level streaks; flat days are neither.
///
/// `days` must be in ascending date order, as `calendar_days` returns them.
pub fn calendar_stats(days: &[CalendarDay]) -> CalendarStats {
    let mut stats = CalendarStats::default();

    for day in days {
        stats.total_pnl += day.pnl;
        if day.pnl > dec!(0) {
            stats.profit_days += 1;
            stats.current_win_streak += 1;
            stats.current_loss_streak = 0;
            stats.max_win_streak = stats.max_win_streak.max(stats.current_win_streak);
        } else if day.pnl < dec!(0) {
            stats.loss_days += 1;
            stats.current_loss_streak += 1;
            stats.current_win_streak = 0;
            stats.max_loss_streak = stats.max_loss_streak.max(stats.current_loss_streak);
        }
    }

    stats
}

/// Rolls calendar rows up by `YYYY-MM`, newest month first, keeping at most
/// `MAX_MONTHS` months.
pub fn monthly_breakdown(days: &[CalendarDay]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<String, MonthlySummary> = BTreeMap::new();
    for day in days {
        let key = day.date.format("%Y-%m").to_string();
        let month = months.entry(key.clone()).or_insert_with(|| MonthlySummary {
            month: key,
            pnl: dec!(0),
            trades: 0,
            profit_days: 0,
            loss_days: 0,
        });
        month.pnl += day.pnl;
        month.trades += day.trades;
        if day.pnl > dec!(0) {
            month.profit_days += 1;
        } else if day.pnl < dec!(0) {
            month.loss_days += 1;
        }
    }

    months.into_values().rev().take(MAX_MONTHS).collect()
}
