// In crates/core-types/src/types.rs

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trading instrument identifier, e.g. `SOL-PERP`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol(value.to_string())
    }
}

/// The direction of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Long,
    Short,
}

/// Lifecycle state of a trade as reported by its producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    Open,
    Closed,
    Liquidated,
}

/// A single trade record, from entry to exit.
///
/// `size` is the quote-currency notional and `pnl` is realized net of fees.
/// `pnl_percentage` is `pnl / size * 100` and `duration_ms` is
/// `exit_time - entry_time` in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub symbol: Symbol,
    pub side: Side,
    pub status: TradeStatus,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub size: Decimal,
    pub leverage: u8,
    pub pnl: Decimal,
    pub pnl_percentage: Decimal,
    pub fees: Decimal,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    pub duration_ms: i64,
}

impl Trade {
    /// A trade is closed once it has an exit and is no longer marked open.
    pub fn is_closed(&self) -> bool {
        self.status != TradeStatus::Open && self.exit_time.is_some()
    }

    /// The UTC calendar day the trade was entered on.
    pub fn day_key(&self) -> NaiveDate {
        self.entry_time.date_naive()
    }

    /// Traded notional including leverage.
    pub fn volume(&self) -> Decimal {
        self.size * Decimal::from(self.leverage)
    }
}

/// Checks that every trade in a collection can be fed to the analytics core.
///
/// The core only works on closed trades, so a single open or malformed
/// record rejects the whole collection.
pub fn validate_trades(trades: &[Trade]) -> Result<()> {
    for trade in trades {
        let Some(exit_time) = trade.exit_time.filter(|_| trade.is_closed()) else {
            return Err(Error::OpenTrade { id: trade.id.clone() });
        };
        if exit_time < trade.entry_time {
            return Err(Error::ExitBeforeEntry { id: trade.id.clone() });
        }
    }
    Ok(())
}
