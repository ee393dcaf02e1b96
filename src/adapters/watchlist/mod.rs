//! In-memory watchlist store
//!
//! Holds the watched address set behind a `tokio::sync::watch` channel so
//! subscribers always see the latest set and get notified on change.
//! Durable on-device persistence is the host application's concern; this
//! store implements the collaborator contract the pipeline consumes.

use std::collections::BTreeSet;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::snapshot::is_valid_address;
use crate::ports::watchlist::WatchlistStore;

/// In-memory [`WatchlistStore`] implementation
#[derive(Debug)]
pub struct MemoryWatchlistStore {
    addresses: watch::Sender<BTreeSet<String>>,
}

impl MemoryWatchlistStore {
    pub fn new() -> Self {
        let (addresses, _) = watch::channel(BTreeSet::new());
        Self { addresses }
    }

    /// Seed the store with pre-validated addresses; invalid entries are
    /// skipped with a warning.
    pub fn with_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for address in addresses {
            let address = address.into();
            if is_valid_address(&address) {
                set.insert(address);
            } else {
                tracing::warn!(%address, "dropping invalid watchlist address");
            }
        }
        let (tx, _) = watch::channel(set);
        Self { addresses: tx }
    }
}

impl Default for MemoryWatchlistStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WatchlistStore for MemoryWatchlistStore {
    fn subscribe(&self) -> watch::Receiver<BTreeSet<String>> {
        self.addresses.subscribe()
    }

    async fn add(&self, address: &str) -> bool {
        let sanitized = address.trim();
        if !is_valid_address(sanitized) {
            tracing::warn!(address = %sanitized, "rejecting invalid watchlist address");
            return false;
        }
        self.addresses
            .send_modify(|set| {
                set.insert(sanitized.to_string());
            });
        true
    }

    async fn remove(&self, address: &str) {
        self.addresses.send_modify(|set| {
            set.remove(address);
        });
    }
}
