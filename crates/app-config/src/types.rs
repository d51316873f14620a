// In crates/app-config/src/types.rs

use analytics::DateRange;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Settings for the synthetic trade generator.
    #[serde(default)]
    pub mock: MockSettings,
    /// Settings for the Solana wallet source.
    pub wallet: WalletSettings,
    /// Where persisted dashboard state lives.
    pub storage: StorageSettings,
    /// Filters applied when none are given on the command line.
    #[serde(default)]
    pub filters: FilterSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MockSettings {
    #[serde(default = "default_trade_count")]
    pub trade_count: usize,
    /// Artificial latency before generated trades are handed over.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            trade_count: default_trade_count(),
            delay_ms: default_delay_ms(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct WalletSettings {
    /// The JSON-RPC endpoint of a Solana node.
    pub rpc_url: String,
    /// How many recent signatures to pull per fetch.
    #[serde(default = "default_signature_limit")]
    pub signature_limit: usize,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StorageSettings {
    /// Path of the JSON file holding annotations and the data-source flag.
    pub state_path: PathBuf,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FilterSettings {
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default = "default_symbol")]
    pub symbol: String,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            date_range: DateRange::default(),
            symbol: default_symbol(),
        }
    }
}

/// Helper functions for serde defaults
fn default_trade_count() -> usize { 150 }
fn default_delay_ms() -> u64 { 500 }
fn default_signature_limit() -> usize { 50 }
fn default_symbol() -> String { "all".to_string() }
