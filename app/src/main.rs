// In app/src/main.rs

use analytics::{CalendarDay, CalendarStats, DateRange, MonthlySummary, SymbolFilter};
use anyhow::{Context, Result};
use app_config::Settings;
use clap::{Parser, Subcommand};
use core_types::Trade;
use dashboard::Dashboard;
use serde::Serialize;
use sources::{MockTradeSource, WalletTradeSource};
use storage::{DataSource, StateFile};
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Performance analytics over a closed-trade history.")]
struct Cli {
    /// Look-back window: 7d, 30d, 90d or all.
    #[arg(long, global = true)]
    range: Option<DateRange>,

    /// Restrict to one instrument (e.g. "SOL-PERP"), or "all".
    #[arg(long, global = true)]
    symbol: Option<SymbolFilter>,

    /// Where trades come from: mock or wallet. Defaults to the last one used.
    #[arg(long, global = true)]
    source: Option<DataSource>,

    /// Solana wallet address, required for the wallet source.
    #[arg(long, global = true)]
    wallet: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prints every derived structure at once.
    Report,
    /// Prints the summary statistics.
    Summary,
    /// Prints the daily equity and drawdown series.
    Daily,
    /// Prints drawdowns, streaks and risk ratios.
    Risk,
    /// Prints the heat-map buckets.
    Calendar,
    /// Lists the filtered trades with their notes.
    Trades,
    /// Lists the symbols present in the trade history.
    Symbols,
    /// Attaches a note to a trade.
    Annotate {
        trade_id: String,
        text: String,
    },
    /// Shows the note attached to a trade.
    Note { trade_id: String },
    /// Deletes the note attached to a trade.
    Unannotate { trade_id: String },
}

#[derive(Serialize)]
struct TradeRow<'a> {
    #[serde(flatten)]
    trade: &'a Trade,
    annotation: Option<&'a str>,
}

#[derive(Serialize)]
struct CalendarView<'a> {
    days: &'a [CalendarDay],
    stats: &'a CalendarStats,
    monthly: &'a [MonthlySummary],
}

/// The source a run actually loads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceChoice<'a> {
    Mock,
    Wallet(&'a str),
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = app_config::load_settings().context("Failed to load settings")?;
    init_tracing(&settings);
    tracing::debug!(?cli, "Parsed command line");

    let state_file = StateFile::from_settings(&settings.storage);
    let mut dashboard = Dashboard::with_filters(
        cli.range.unwrap_or(settings.filters.date_range),
        cli.symbol.clone().unwrap_or_else(|| {
            settings.filters.symbol.parse().unwrap_or_default()
        }),
    );
    dashboard.restore(state_file.load()?);

    // Note commands work on the persisted state alone.
    match &cli.command {
        Commands::Annotate { trade_id, text } => {
            dashboard.update_annotation(trade_id, text);
            state_file.save(&dashboard.persisted())?;
            tracing::info!(%trade_id, "Annotation saved");
            return Ok(());
        }
        Commands::Note { trade_id } => {
            print_json(&dashboard.annotation(trade_id))?;
            return Ok(());
        }
        Commands::Unannotate { trade_id } => {
            if dashboard.remove_annotation(trade_id).is_none() {
                tracing::warn!(%trade_id, "Trade has no annotation");
            }
            state_file.save(&dashboard.persisted())?;
            return Ok(());
        }
        _ => {}
    }

    load_trades(&mut dashboard, &settings, &cli).await?;
    state_file.save(&dashboard.persisted())?;

    let snapshot = dashboard.snapshot();
    match cli.command {
        Commands::Report => print_json(snapshot)?,
        Commands::Summary => print_json(&snapshot.summary)?,
        Commands::Daily => print_json(&snapshot.daily)?,
        Commands::Risk => print_json(&snapshot.risk)?,
        Commands::Calendar => print_json(&CalendarView {
            days: &snapshot.calendar,
            stats: &snapshot.calendar_stats,
            monthly: &snapshot.monthly,
        })?,
        Commands::Trades => {
            let rows: Vec<TradeRow> = snapshot
                .trades
                .iter()
                .map(|trade| TradeRow {
                    trade,
                    annotation: dashboard.annotation(&trade.id),
                })
                .collect();
            print_json(&rows)?;
        }
        Commands::Symbols => print_json(&snapshot.available_symbols)?,
        Commands::Annotate { .. } | Commands::Note { .. } | Commands::Unannotate { .. } => {
            unreachable!("handled before loading trades")
        }
    }

    Ok(())
}

fn init_tracing(settings: &Settings) {
    let level = settings
        .app
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    // Logs go to stderr so stdout stays pure JSON.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(
            tracing_subscriber::filter::Targets::new()
                .with_target("reqwest", tracing::Level::WARN)
                .with_target("hyper", tracing::Level::WARN)
                .with_default(level),
        );
    tracing_subscriber::registry().with(fmt_layer).init();
}

/// Picks the source for this run: the one on the command line, else the one
/// used last time.
///
/// A remembered wallet cannot be reloaded without its address, which is never
/// persisted, so that case falls back to mock data.
fn choose_source<'a>(
    requested: Option<DataSource>,
    last_used: DataSource,
    wallet: Option<&'a str>,
) -> Result<SourceChoice<'a>> {
    match (requested, wallet) {
        (Some(DataSource::Wallet), None) => {
            anyhow::bail!("The wallet source needs --wallet <ADDRESS>.")
        }
        (Some(DataSource::Mock), _) => Ok(SourceChoice::Mock),
        (_, Some(address)) if requested.is_some() || last_used == DataSource::Wallet => {
            Ok(SourceChoice::Wallet(address))
        }
        (None, None) if last_used == DataSource::Wallet => {
            tracing::warn!("Last run used a wallet but no --wallet was given, falling back to mock data");
            Ok(SourceChoice::Mock)
        }
        _ => Ok(SourceChoice::Mock),
    }
}

/// Fills the dashboard from the chosen source.
async fn load_trades(dashboard: &mut Dashboard, settings: &Settings, cli: &Cli) -> Result<()> {
    let mock = MockTradeSource::from_settings(&settings.mock);

    match choose_source(cli.source, dashboard.data_source(), cli.wallet.as_deref())? {
        SourceChoice::Wallet(address) => {
            let wallet = WalletTradeSource::new(&settings.wallet, address)?;
            dashboard.connect_wallet(&wallet).await?;
        }
        SourceChoice::Mock if dashboard.data_source() == DataSource::Wallet => {
            dashboard.disconnect_wallet(&mock).await?;
        }
        SourceChoice::Mock => dashboard.load_from(&mock).await?,
    }

    tracing::info!(
        source = %dashboard.data_source(),
        trades = dashboard.state().all_trades.len(),
        filtered = dashboard.snapshot().trades.len(),
        "Trades loaded"
    );
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const ADDRESS: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_options_parse_without_settings() {
        let cli = Cli::try_parse_from([
            "app", "calendar", "--range", "30d", "--symbol", "SOL-PERP", "--source", "wallet",
        ])
        .unwrap();
        assert_eq!(cli.range, Some(DateRange::Last30Days));
        assert_eq!(cli.source, Some(DataSource::Wallet));
        assert!(matches!(cli.command, Commands::Calendar));

        assert!(Cli::try_parse_from(["app", "report", "--source", "chain"]).is_err());
    }

    #[test]
    fn remembered_wallet_without_address_falls_back_to_mock() {
        let choice = choose_source(None, DataSource::Wallet, None).unwrap();
        assert_eq!(choice, SourceChoice::Mock);
    }

    #[test]
    fn remembered_wallet_reloads_when_the_address_is_given() {
        let choice = choose_source(None, DataSource::Wallet, Some(ADDRESS)).unwrap();
        assert_eq!(choice, SourceChoice::Wallet(ADDRESS));
    }

    #[test]
    fn explicit_wallet_needs_an_address() {
        assert!(choose_source(Some(DataSource::Wallet), DataSource::Mock, None).is_err());
        assert_eq!(
            choose_source(Some(DataSource::Wallet), DataSource::Mock, Some(ADDRESS)).unwrap(),
            SourceChoice::Wallet(ADDRESS)
        );
    }

    #[test]
    fn explicit_mock_wins_over_a_given_address() {
        assert_eq!(
            choose_source(Some(DataSource::Mock), DataSource::Wallet, Some(ADDRESS)).unwrap(),
            SourceChoice::Mock
        );
        assert_eq!(choose_source(None, DataSource::Mock, Some(ADDRESS)).unwrap(), SourceChoice::Mock);
    }
}
