// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Trade {id} is still open and cannot be analysed")]
    OpenTrade { id: String },

    #[error("Trade {id} exits before it enters")]
    ExitBeforeEntry { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
