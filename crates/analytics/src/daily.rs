// In crates/analytics/src/daily.rs

use crate::types::DailyPerformance;
use chrono::NaiveDate;
use core_types::Trade;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

#[derive(Default)]
struct DayBucket {
    pnl: Decimal,
    trades: u32,
    volume: Decimal,
    fees: Decimal,
}

/// Groups trades by the UTC day of their entry and builds the equity series.
///
/// Rows come out in ascending date order. The running high-water mark starts
/// at zero, so a losing first day already shows as drawdown.
pub fn daily_performance(trades: &[Trade]) -> Vec<DailyPerformance> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    for trade in trades {
        let bucket = buckets.entry(trade.day_key()).or_default();
        bucket.pnl += trade.pnl;
        bucket.trades += 1;
        bucket.volume += trade.volume();
        bucket.fees += trade.fees;
    }

    let mut cumulative_pnl = dec!(0);
    let mut high_water_mark = dec!(0);

    buckets
        .into_iter()
        .map(|(date, bucket)| {
            cumulative_pnl += bucket.pnl;
            high_water_mark = high_water_mark.max(cumulative_pnl);

            DailyPerformance {
                date,
                pnl: bucket.pnl,
                trades: bucket.trades,
                volume: bucket.volume,
                fees: bucket.fees,
                cumulative_pnl,
                high_water_mark,
                drawdown: high_water_mark - cumulative_pnl,
            }
        })
        .collect()
}
