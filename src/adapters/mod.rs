//! Adapters Layer - Concrete implementations of the ports
//!
//! - `rpc`: Solana JSON-RPC transport over HTTPS
//! - `watchlist`: in-memory observable address store
//! - `cli`: command-line surface

pub mod cli;
pub mod rpc;
pub mod watchlist;
