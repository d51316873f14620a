// In crates/storage/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to access the state file: {0}")]
    Io(#[from] std::io::Error),
    #[error("State file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Unknown data source '{0}', expected mock or wallet")]
    InvalidDataSource(String),
}

pub type Result<T> = std::result::Result<T, Error>;
