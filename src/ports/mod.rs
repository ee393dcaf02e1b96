//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - Solana JSON-RPC transport (balance, history, account info, tokens)
//! - The persisted watchlist address store

pub mod mocks;
pub mod rpc;
pub mod watchlist;

pub use rpc::{RpcError, SolanaRpcPort};
pub use watchlist::WatchlistStore;
