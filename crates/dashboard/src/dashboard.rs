// In crates/dashboard/src/dashboard.rs

use crate::annotations::AnnotationStore;
use crate::state::{recompute, DashboardSnapshot, DashboardState};
use crate::Result;
use analytics::{DateRange, SymbolFilter};
use chrono::Utc;
use core_types::{validate_trades, Trade};
use sources::{TradeSource, WalletTradeSource};
use storage::{DataSource, PersistedState};

/// Holds the current trade set, its filters and the snapshot derived from them.
///
/// Every mutation of the trades or the filters recomputes the snapshot in
/// full. Annotations and the data-source flag are kept apart from that cycle
/// and are the only parts that are persisted.
#[derive(Debug, Default)]
pub struct Dashboard {
    state: DashboardState,
    snapshot: DashboardSnapshot,
    annotations: AnnotationStore,
    data_source: DataSource,
    wallet_address: Option<String>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty dashboard with the given filters pre-selected.
    pub fn with_filters(date_range: DateRange, symbol_filter: SymbolFilter) -> Self {
        let mut dashboard = Self::new();
        dashboard.state.date_range = date_range;
        dashboard.state.symbol_filter = symbol_filter;
        dashboard
    }

    /// Restores the persisted notes and data-source flag.
    pub fn restore(&mut self, persisted: PersistedState) {
        self.annotations = AnnotationStore::from(persisted.annotations);
        self.data_source = persisted.data_source;
    }

    /// The state worth keeping across sessions.
    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            annotations: self.annotations.to_map(),
            data_source: self.data_source,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    pub fn data_source(&self) -> DataSource {
        self.data_source
    }

    pub fn wallet_address(&self) -> Option<&str> {
        self.wallet_address.as_deref()
    }

    // --- Trade set ---

    /// Replaces the full trade set.
    ///
    /// An invalid collection is rejected as a whole and leaves the current
    /// trades and snapshot untouched.
    pub fn set_trades(&mut self, trades: Vec<Trade>) -> Result<()> {
        validate_trades(&trades)?;
        self.state.all_trades = trades;
        self.refresh();
        Ok(())
    }

    /// Replaces the trade set with a wallet's history and switches to the wallet source.
    pub fn set_wallet_trades(&mut self, trades: Vec<Trade>, address: &str) -> Result<()> {
        self.set_trades(trades)?;
        self.data_source = DataSource::Wallet;
        self.wallet_address = Some(address.to_string());
        Ok(())
    }

    /// Fetches a fresh trade set from `source` and swaps it in.
    ///
    /// A failing source surfaces its error and the dashboard keeps what it had.
    pub async fn load_from(&mut self, source: &dyn TradeSource) -> Result<()> {
        let trades = self.fetch(source).await?;
        self.set_trades(trades)
    }

    /// Loads a wallet's history and marks the wallet as the active source.
    pub async fn connect_wallet(&mut self, source: &WalletTradeSource) -> Result<()> {
        let trades = self.fetch(source).await?;
        self.set_wallet_trades(trades, source.address())
    }

    /// Drops the wallet and reloads from the synthetic `source`.
    pub async fn disconnect_wallet(&mut self, source: &dyn TradeSource) -> Result<()> {
        self.load_from(source).await?;
        self.data_source = DataSource::Mock;
        self.wallet_address = None;
        Ok(())
    }

    async fn fetch(&self, source: &dyn TradeSource) -> Result<Vec<Trade>> {
        tracing::info!(source = source.name(), "Fetching trades");
        source.fetch_trades().await.map_err(|e| {
            tracing::warn!(source = source.name(), error = %e, "Trade source failed, keeping current trades");
            e.into()
        })
    }

    // --- Filters ---

    pub fn set_date_range(&mut self, range: DateRange) {
        self.state.date_range = range;
        self.refresh();
    }

    pub fn set_symbol_filter(&mut self, filter: SymbolFilter) {
        self.state.symbol_filter = filter;
        self.refresh();
    }

    // --- Annotations ---

    pub fn annotation(&self, trade_id: &str) -> Option<&str> {
        self.annotations.get(trade_id)
    }

    pub fn update_annotation(&mut self, trade_id: &str, text: &str) {
        self.annotations.set(trade_id, text);
    }

    pub fn remove_annotation(&mut self, trade_id: &str) -> Option<String> {
        self.annotations.remove(trade_id)
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    fn refresh(&mut self) {
        self.snapshot = recompute(&self.state, Utc::now());
    }
}
