// In crates/analytics/src/lib.rs

pub mod calendar;
pub mod daily;
pub mod engine;
pub mod error;
pub mod filter;
pub mod risk;
pub mod summary;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export public types
pub use engine::AnalyticsEngine;
pub use error::{Error, Result};
pub use filter::{available_symbols, filter_trades, DateRange, SymbolFilter};
pub use types::{
    AnalyticsReport, CalendarDay, CalendarStats, DailyPerformance, MonthlySummary, RiskMetrics,
    SummaryMetrics,
};
