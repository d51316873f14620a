// In crates/analytics/src/types.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate win/loss/volume/fee statistics over a set of closed trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SummaryMetrics {
    pub total_pnl: Decimal,
    pub total_pnl_percentage: f64,
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    pub win_rate: f64,
    /// `f64::INFINITY` when there is profit and no loss.
    #[serde(with = "infinite_ratio")]
    pub profit_factor: f64,
    pub gross_profit: Decimal,
    pub gross_loss: Decimal,
    pub average_win: Decimal,
    pub average_loss: Decimal,
    pub largest_win: Decimal,
    pub largest_loss: Decimal,
    pub average_trade_duration_ms: f64,
    pub total_volume: Decimal,
    pub total_fees: Decimal,
    pub long_trades: u32,
    pub short_trades: u32,
    pub long_percentage: f64,
    pub short_percentage: f64,
    pub expectancy: Decimal,
}

impl SummaryMetrics {
    /// Creates an empty snapshot with every figure at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

/// One row of the equity/drawdown series: a calendar day with at least one trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPerformance {
    pub date: NaiveDate,
    pub pnl: Decimal,
    pub trades: u32,
    pub volume: Decimal,
    pub fees: Decimal,
    pub cumulative_pnl: Decimal,
    pub high_water_mark: Decimal,
    /// `high_water_mark - cumulative_pnl`, never negative.
    pub drawdown: Decimal,
}

/// Drawdown extremes, loss streaks and risk-adjusted ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RiskMetrics {
    pub risk_of_ruin: f64,
    pub max_drawdown: Decimal,
    pub max_drawdown_percentage: f64,
    pub current_drawdown: Decimal,
    pub current_drawdown_percentage: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub calmar_ratio: f64,
    pub consecutive_losses: u32,
    pub max_consecutive_losses: u32,
}

impl RiskMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A heat-map cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub pnl: Decimal,
    pub trades: u32,
    pub is_profit: bool,
    /// Bucket in `0..=4`.
    pub intensity: u8,
}

/// Headline figures shown next to the heat-map.
///
/// Streaks run over days, not trades: a flat day neither extends nor breaks one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CalendarStats {
    pub profit_days: u32,
    pub loss_days: u32,
    pub total_pnl: Decimal,
    pub current_win_streak: u32,
    pub current_loss_streak: u32,
    pub max_win_streak: u32,
    pub max_loss_streak: u32,
}

/// Calendar rows rolled up per month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// `YYYY-MM`.
    pub month: String,
    pub pnl: Decimal,
    pub trades: u32,
    pub profit_days: u32,
    pub loss_days: u32,
}

/// Everything the analytics core derives from one filtered trade set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalyticsReport {
    pub summary: SummaryMetrics,
    pub daily: Vec<DailyPerformance>,
    pub risk: RiskMetrics,
    pub calendar: Vec<CalendarDay>,
    pub calendar_stats: CalendarStats,
    /// Most recent months first.
    pub monthly: Vec<MonthlySummary>,
}

// JSON has no infinity, so the profit-factor sentinel travels as a string.
mod infinite_ratio {
    use serde::{de, Deserialize, Deserializer, Serializer};

    const POSITIVE: &str = "Infinity";
    const NEGATIVE: &str = "-Infinity";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_infinite() {
            serializer.serialize_str(if *value > 0.0 { POSITIVE } else { NEGATIVE })
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(text) => match text.as_str() {
                POSITIVE => Ok(f64::INFINITY),
                NEGATIVE => Ok(f64::NEG_INFINITY),
                other => Err(de::Error::custom(format!("invalid ratio: {other}"))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinite_profit_factor_survives_json() {
        let summary = SummaryMetrics {
            profit_factor: f64::INFINITY,
            ..SummaryMetrics::new()
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["profit_factor"], "Infinity");

        let back: SummaryMetrics = serde_json::from_value(json).unwrap();
        assert!(back.profit_factor.is_infinite());
    }

    #[test]
    fn finite_profit_factor_is_a_plain_number() {
        let summary = SummaryMetrics {
            profit_factor: 6.0,
            ..SummaryMetrics::new()
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["profit_factor"], 6.0);
    }

    #[test]
    fn day_keys_serialize_as_iso_dates() {
        let day = CalendarDay {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            pnl: Decimal::ZERO,
            trades: 1,
            is_profit: true,
            intensity: 0,
        };
        assert_eq!(serde_json::to_value(&day).unwrap()["date"], "2024-01-05");
    }
}
