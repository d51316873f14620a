// In crates/sources/src/lib.rs

use async_trait::async_trait;
use core_types::Trade;

pub mod error;
pub mod mock;
pub mod types;
pub mod wallet;

// Re-export public types
pub use error::{Error, Result};
pub use mock::MockTradeSource;
pub use wallet::{parse_transaction, validate_address, WalletTradeSource};

/// Instruments every built-in source maps trades onto.
pub const SYMBOLS: [&str; 5] = ["SOL-PERP", "JUP-PERP", "BONK-PERP", "WIF-PERP", "PYTH-PERP"];

/// The universal interface for anything that produces a trade history.
///
/// A `TradeSource` hands over a finished collection of closed trades; the
/// analytics core never sees a partially fetched set. Any failure is reported
/// as an `Error` and no trades are returned.
#[async_trait]
pub trait TradeSource: Send + Sync {
    /// The name of the source (e.g., "mock", "wallet").
    fn name(&self) -> &'static str;

    /// Produces the full trade collection.
    async fn fetch_trades(&self) -> Result<Vec<Trade>>;
}
