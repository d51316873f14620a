// In crates/sources/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("RPC error: code {code}, msg: {msg}")]
    RpcError { code: i64, msg: String },
}

pub type Result<T> = std::result::Result<T, Error>;
