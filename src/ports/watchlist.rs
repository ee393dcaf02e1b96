//! Watchlist store port
//!
//! The pipeline only reads and writes addresses through this store; fetched
//! balances never touch it. The address set is published as an observable
//! stream so consumers can react when entries are added or removed.

use async_trait::async_trait;
use std::collections::BTreeSet;
use tokio::sync::watch;

/// Persisted set of watched addresses
#[async_trait]
pub trait WatchlistStore: Send + Sync {
    /// Observable view of the current address set. The receiver holds the
    /// latest set immediately and is notified on every change.
    fn subscribe(&self) -> watch::Receiver<BTreeSet<String>>;

    /// Add an address. Returns false when the input fails base58/length
    /// validation and was rejected.
    async fn add(&self, address: &str) -> bool;

    /// Remove an address. Removing an unknown address is a no-op.
    async fn remove(&self, address: &str);
}
