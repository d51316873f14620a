use crate::{Result, TradeSource, SYMBOLS};
use app_config::MockSettings;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use core_types::{Side, Symbol, Trade, TradeStatus};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

const LEVERAGES: [u8; 6] = [1, 2, 3, 5, 10, 20];

/// Days of history the generated trades are spread over.
const HISTORY_DAYS: i64 = 90;

/// Reference price and relative volatility per instrument.
fn price_profile(symbol: &str) -> (f64, f64) {
    match symbol {
        "SOL-PERP" => (148.50, 0.08),
        "JUP-PERP" => (0.82, 0.12),
        "BONK-PERP" => (0.000028, 0.25),
        "WIF-PERP" => (2.15, 0.18),
        _ => (0.38, 0.15),
    }
}

/// Generates synthetic but internally consistent trades, after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockTradeSource {
    count: usize,
    delay: std::time::Duration,
}

impl MockTradeSource {
    pub fn new(count: usize, delay: std::time::Duration) -> Self {
        Self { count, delay }
    }

    pub fn from_settings(settings: &MockSettings) -> Self {
        Self::new(settings.trade_count, std::time::Duration::from_millis(settings.delay_ms))
    }
}

impl Default for MockTradeSource {
    fn default() -> Self {
        Self::from_settings(&MockSettings::default())
    }
}

#[async_trait]
impl TradeSource for MockTradeSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_trades(&self) -> Result<Vec<Trade>> {
        tokio::time::sleep(self.delay).await;
        let trades = generate_trades(&mut rand::thread_rng(), self.count, Utc::now());
        tracing::info!(count = trades.len(), "Generated mock trade history");
        Ok(trades)
    }
}

/// Builds `count` closed trades spread evenly over the last 90 days before
/// `now`, newest first.
pub fn generate_trades<R: Rng>(rng: &mut R, count: usize, now: DateTime<Utc>) -> Vec<Trade> {
    let mut trades: Vec<Trade> = (0..count)
        .map(|index| {
            let days_back = HISTORY_DAYS * (count - index) as i64;
            let exit_time = now - Duration::minutes(days_back * 24 * 60 / count as i64);
            generate_trade(rng, index, exit_time)
        })
        .collect();
    trades.sort_by(|a, b| b.entry_time.cmp(&a.entry_time));
    trades
}

fn generate_trade<R: Rng>(rng: &mut R, index: usize, exit_time: DateTime<Utc>) -> Trade {
    let symbol = *SYMBOLS.choose(rng).unwrap_or(&SYMBOLS[0]);
    let (base_price, volatility) = price_profile(symbol);
    let side = if rng.r#gen::<f64>() > 0.45 { Side::Long } else { Side::Short };
    let direction = if side == Side::Long { 1.0 } else { -1.0 };
    let leverage = *LEVERAGES.choose(rng).unwrap_or(&1);
    let size = rng.gen_range(100.0..5000.0);

    // Slight long bias in the price path.
    let price_move = (rng.r#gen::<f64>() - 0.45) * volatility;
    let entry_price = base_price * (1.0 + rng.gen_range(-0.1..0.1));
    let exit_price = entry_price * (1.0 + price_move * direction);

    let gross_pnl = (exit_price - entry_price) / entry_price * size * f64::from(leverage) * direction;
    let fees = size * f64::from(leverage) * rng.gen_range(0.0005..0.001);

    let duration_ms = rng.gen_range(5 * 60 * 1000..7 * 24 * 60 * 60 * 1000_i64);
    let entry_time = exit_time - Duration::milliseconds(duration_ms);

    let size = to_decimal(size, 2);
    let fees = to_decimal(fees, 2);
    let pnl = to_decimal(gross_pnl, 2) - fees;

    Trade {
        id: format!("mock-{}-{index}", entry_time.timestamp_millis()),
        symbol: Symbol::from(symbol),
        side,
        status: TradeStatus::Closed,
        entry_price: to_decimal(entry_price, 10),
        exit_price: Some(to_decimal(exit_price, 10)),
        size,
        leverage,
        pnl,
        pnl_percentage: (pnl / size * dec!(100)).round_dp(4),
        fees,
        entry_time,
        exit_time: Some(exit_time),
        duration_ms,
    }
}

fn to_decimal(value: f64, dp: u32) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(dp)
}
