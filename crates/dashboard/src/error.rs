// In crates/dashboard/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Rejected trade collection: {0}")]
    InvalidTrades(#[from] core_types::Error),
    #[error("Trade source failed: {0}")]
    Source(#[from] sources::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
