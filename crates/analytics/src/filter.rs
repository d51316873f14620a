// In crates/analytics/src/filter.rs

use crate::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use core_types::{Symbol, Trade};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The look-back window applied to trade entry times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl DateRange {
    /// Window length in days, `None` when unbounded.
    pub fn days(self) -> Option<i64> {
        match self {
            DateRange::Last7Days => Some(7),
            DateRange::Last30Days => Some(30),
            DateRange::Last90Days => Some(90),
            DateRange::All => None,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DateRange::Last7Days => "7d",
            DateRange::Last30Days => "30d",
            DateRange::Last90Days => "90d",
            DateRange::All => "all",
        };
        f.write_str(label)
    }
}

impl FromStr for DateRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "7d" => Ok(DateRange::Last7Days),
            "30d" => Ok(DateRange::Last30Days),
            "90d" => Ok(DateRange::Last90Days),
            "all" => Ok(DateRange::All),
            _ => Err(Error::InvalidDateRange(s.to_string())),
        }
    }
}

/// Restricts the trade set to one instrument, or lets everything through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SymbolFilter {
    #[default]
    All,
    Only(Symbol),
}

impl SymbolFilter {
    pub fn matches(&self, symbol: &Symbol) -> bool {
        match self {
            SymbolFilter::All => true,
            SymbolFilter::Only(wanted) => wanted == symbol,
        }
    }
}

impl fmt::Display for SymbolFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolFilter::All => f.write_str("all"),
            SymbolFilter::Only(symbol) => write!(f, "{symbol}"),
        }
    }
}

impl FromStr for SymbolFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            Ok(SymbolFilter::All)
        } else {
            Ok(SymbolFilter::Only(Symbol(s.to_string())))
        }
    }
}

/// Reduces `trades` to those entered within `[now - window, now]` and
/// matching the symbol selector, keeping their relative order.
///
/// `DateRange::All` applies no time boundary at all.
pub fn filter_trades(
    trades: &[Trade],
    range: DateRange,
    symbol: &SymbolFilter,
    now: DateTime<Utc>,
) -> Vec<Trade> {
    let window = range.days().map(|days| (now - Duration::days(days), now));

    trades
        .iter()
        .filter(|t| match window {
            Some((start, end)) => t.entry_time >= start && t.entry_time <= end,
            None => true,
        })
        .filter(|t| symbol.matches(&t.symbol))
        .cloned()
        .collect()
}

/// The sorted, distinct symbols present in a trade set.
pub fn available_symbols(trades: &[Trade]) -> Vec<Symbol> {
    trades
        .iter()
        .map(|t| t.symbol.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
