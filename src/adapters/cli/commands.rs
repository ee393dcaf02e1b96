//! CLI Command Definitions
//!
//! Argument parsing for the solscope binary. Handlers live in main.rs.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SolScope - Solana wallet risk analyzer
#[derive(Parser, Debug)]
#[command(
    name = "solscope",
    version = env!("CARGO_PKG_VERSION"),
    about = "Solana wallet risk analyzer",
    long_about = "SolScope queries a Solana JSON-RPC endpoint for facts about a wallet \
                  address, merges them into one snapshot, and derives a bounded, \
                  explainable risk score."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze one wallet address and print its risk score
    Analyze(AnalyzeCmd),

    /// Refresh a set of watched addresses and print their balances
    Watch(WatchCmd),
}

/// Analyze one wallet address
#[derive(Parser, Debug)]
pub struct AnalyzeCmd {
    /// Base58 wallet address to analyze
    pub address: String,

    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Target network (overrides the config value)
    #[arg(short, long, value_name = "NETWORK")]
    pub network: Option<String>,

    /// Print the full result as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Refresh watched addresses
#[derive(Parser, Debug)]
pub struct WatchCmd {
    /// Base58 wallet addresses to watch
    #[arg(required = true)]
    pub addresses: Vec<String>,

    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Target network (overrides the config value)
    #[arg(short, long, value_name = "NETWORK")]
    pub network: Option<String>,
}
