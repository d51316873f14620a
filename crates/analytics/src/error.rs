// In crates/analytics/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown date range '{0}', expected one of 7d, 30d, 90d, all")]
    InvalidDateRange(String),
}

pub type Result<T> = std::result::Result<T, Error>;
