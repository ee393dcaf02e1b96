//! SolScope - Solana Wallet Risk Analyzer Library
//!
//! Queries a Solana JSON-RPC endpoint for facts about a wallet address,
//! merges them into one immutable snapshot, and derives a bounded,
//! explainable risk score.
//!
//! # Modules
//!
//! - `domain`: Core types and scoring (WalletSnapshot, RiskEngine)
//! - `ports`: Trait abstractions (SolanaRpcPort, WatchlistStore)
//! - `adapters`: External implementations (HTTP RPC, watchlist, CLI)
//! - `application`: Use-case orchestration (analyzer, aggregator, refresher)
//! - `config`: Configuration loading and validation

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
