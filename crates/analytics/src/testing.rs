// Trade fixtures shared by the unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_types::{Side, Symbol, Trade, TradeStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, n, 10, 0, 0).unwrap()
}

pub fn trade_at(id: &str, symbol: &str, pnl: Decimal, entry_time: DateTime<Utc>) -> Trade {
    let size = dec!(1000);
    Trade {
        id: id.to_string(),
        symbol: Symbol::from(symbol),
        side: Side::Long,
        status: TradeStatus::Closed,
        entry_price: dec!(100),
        exit_price: Some(dec!(101)),
        size,
        leverage: 2,
        pnl,
        pnl_percentage: pnl / size * dec!(100),
        fees: dec!(1),
        entry_time,
        exit_time: Some(entry_time + Duration::minutes(30)),
        duration_ms: 30 * 60 * 1000,
    }
}

pub fn trade(id: &str, pnl: Decimal, entry_time: DateTime<Utc>) -> Trade {
    trade_at(id, "SOL-PERP", pnl, entry_time)
}
