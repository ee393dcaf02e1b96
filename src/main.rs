//! SolScope - Solana Wallet Risk Analyzer
//!
//! Queries Solana JSON-RPC for wallet facts and derives a bounded,
//! explainable risk score.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use solscope::adapters::cli::{AnalyzeCmd, CliApp, Command, WatchCmd};
use solscope::adapters::rpc::{HttpRpcClient, RpcClientConfig};
use solscope::adapters::watchlist::MemoryWatchlistStore;
use solscope::application::{AnalysisState, WalletAnalyzer, WatchlistRefresher};
use solscope::config::{load_config, Config};
use solscope::domain::{lamports_to_sol, SolanaNetwork};
use solscope::ports::watchlist::WatchlistStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (endpoint overrides go here)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();

    let config = match &app.command {
        Command::Analyze(cmd) => load_config_or_default(cmd.config.as_deref())?,
        Command::Watch(cmd) => load_config_or_default(cmd.config.as_deref())?,
    };
    init_logging(app.verbose, app.debug, &config.logging.level);

    match app.command {
        Command::Analyze(cmd) => analyze_command(cmd, config).await,
        Command::Watch(cmd) => watch_command(cmd, config).await,
    }
}

fn load_config_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn init_logging(verbose: bool, debug: bool, config_level: &str) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new(config_level)
    };

    fmt().with_env_filter(filter).init();
}

fn resolve_network(flag: &Option<String>, config: &Config) -> Result<SolanaNetwork> {
    match flag {
        Some(name) => name.parse().map_err(anyhow::Error::msg),
        None => config.solana.network().context("Invalid network in config"),
    }
}

fn build_rpc_client(config: &Config) -> Result<Arc<HttpRpcClient>> {
    let client = HttpRpcClient::with_config(RpcClientConfig {
        timeout: Duration::from_secs(config.solana.timeout_secs),
        endpoint_override: config.solana.get_rpc_override(),
    })
    .context("Failed to create RPC client")?;
    Ok(Arc::new(client))
}

async fn analyze_command(cmd: AnalyzeCmd, config: Config) -> Result<()> {
    let network = resolve_network(&cmd.network, &config)?;
    let rpc = build_rpc_client(&config)?;
    let analyzer = WalletAnalyzer::new(rpc, network)
        .with_signature_limit(config.analysis.signature_limit);

    match analyzer.analyze(&cmd.address).await {
        AnalysisState::Success(score) => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&score)?);
                return Ok(());
            }

            println!("Address:   {}", score.snapshot.address);
            println!("Network:   {}", network);
            println!("Score:     {} ({:?})", score.score, score.level);
            println!(
                "Balance:   {:.9} SOL ({} lamports)",
                lamports_to_sol(score.snapshot.balance),
                score.snapshot.balance
            );
            println!(
                "Activity:  {} recent transaction(s){}",
                score.snapshot.transaction_count,
                score
                    .snapshot
                    .recent_signatures
                    .first()
                    .and_then(|s| s.block_time)
                    .map(|t| format!(", last at {}", format_block_time(t)))
                    .unwrap_or_default()
            );
            println!("Tokens:    {} holding(s)", score.snapshot.token_accounts.len());

            for reason in &score.reasons {
                println!("  [-] {}", reason);
            }
            for positive in &score.positives {
                println!("  [+] {}", positive);
            }
            Ok(())
        }
        AnalysisState::Error { message, kind } => {
            bail!("{} ({:?})", message, kind)
        }
        // analyze() only returns terminal states
        state => bail!("unexpected analysis state: {:?}", state),
    }
}

async fn watch_command(cmd: WatchCmd, config: Config) -> Result<()> {
    let network = resolve_network(&cmd.network, &config)?;
    let rpc = build_rpc_client(&config)?;

    let store = MemoryWatchlistStore::new();
    for address in &cmd.addresses {
        if !store.add(address).await {
            eprintln!("skipping invalid address: {}", address);
        }
    }

    let addresses = store.subscribe().borrow().clone();
    if addresses.is_empty() {
        bail!("No valid addresses to watch");
    }

    let entries = WatchlistRefresher::<HttpRpcClient>::reconcile(&HashMap::new(), &addresses);
    let order: Vec<String> = entries.into_iter().map(|e| e.address).collect();

    let refresher = WatchlistRefresher::new(rpc, network);
    let results = refresher.refresh(&order).await;

    println!("{:<44}  {:>16}  {}", "ADDRESS", "BALANCE (SOL)", "LAST ACTIVITY");
    for address in &order {
        match results.get(address) {
            Some(entry) if entry.error => {
                println!("{:<44}  {:>16}  -", address, "fetch failed");
            }
            Some(entry) => {
                let balance = entry
                    .balance
                    .map(|sol| format!("{:.4}", sol))
                    .unwrap_or_else(|| "-".to_string());
                let activity = entry
                    .last_txn_time
                    .map(format_block_time)
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<44}  {:>16}  {}", address, balance, activity);
            }
            None => println!("{:<44}  {:>16}  -", address, "-"),
        }
    }
    Ok(())
}

fn format_block_time(epoch_seconds: i64) -> String {
    chrono::DateTime::from_timestamp(epoch_seconds, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| epoch_seconds.to_string())
}
