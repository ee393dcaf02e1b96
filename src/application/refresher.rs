//! Concurrent watchlist refresh
//!
//! Fetches balance and most-recent-activity time for every watched address
//! in parallel, isolating per-address failures. All fetches are awaited
//! together before the combined map is returned - no partial results
//! stream out.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::domain::network::SolanaNetwork;
use crate::domain::snapshot::lamports_to_sol;
use crate::ports::rpc::SolanaRpcPort;

/// Display row for one watched address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub address: String,
    /// Balance in SOL; `None` until fetched or when the fetch failed
    pub balance: Option<f64>,
    /// True while a fetch for this entry is outstanding
    pub balance_loading: bool,
    /// True when the balance fetch failed
    pub error: bool,
    /// Block time of the most recent transaction, epoch seconds
    pub last_txn_time: Option<i64>,
}

impl WatchlistEntry {
    /// Fresh entry for an address that has not been fetched yet
    pub fn loading(address: String) -> Self {
        Self {
            address,
            balance: None,
            balance_loading: true,
            error: false,
            last_txn_time: None,
        }
    }
}

/// Refreshes watchlist entries with bulk-barrier concurrency
pub struct WatchlistRefresher<R> {
    rpc: Arc<R>,
    network: SolanaNetwork,
}

impl<R: SolanaRpcPort + 'static> WatchlistRefresher<R> {
    pub fn new(rpc: Arc<R>, network: SolanaNetwork) -> Self {
        Self { rpc, network }
    }

    /// Reconcile a stored address set against already-known entries.
    /// Known addresses keep their fetched data; new ones start loading;
    /// addresses gone from the set drop out.
    pub fn reconcile(
        known: &HashMap<String, WatchlistEntry>,
        addresses: &BTreeSet<String>,
    ) -> Vec<WatchlistEntry> {
        addresses
            .iter()
            .map(|address| {
                known
                    .get(address)
                    .cloned()
                    .unwrap_or_else(|| WatchlistEntry::loading(address.clone()))
            })
            .collect()
    }

    /// Fetch balance and latest activity for every address concurrently.
    ///
    /// Per-address isolation: a failed balance fetch marks only that
    /// entry with `error = true`; a missing block time is tolerated
    /// silently. The returned map always has one entry per input address.
    pub async fn refresh(&self, addresses: &[String]) -> HashMap<String, WatchlistEntry> {
        let mut tasks = JoinSet::new();
        for address in addresses {
            let rpc = Arc::clone(&self.rpc);
            let network = self.network;
            let address = address.clone();
            tasks.spawn(async move { fetch_entry(rpc, network, address).await });
        }

        let mut entries = HashMap::with_capacity(addresses.len());
        // Bulk barrier: every task joins before the map is published
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(entry) => {
                    entries.insert(entry.address.clone(), entry);
                }
                Err(e) => tracing::error!("watchlist fetch task panicked: {}", e),
            }
        }
        entries
    }
}

async fn fetch_entry<R: SolanaRpcPort>(
    rpc: Arc<R>,
    network: SolanaNetwork,
    address: String,
) -> WatchlistEntry {
    let balance = match rpc.get_balance(&address, network).await {
        Ok(lamports) => Some(lamports_to_sol(lamports)),
        Err(err) => {
            tracing::warn!(%address, %err, "watchlist balance fetch failed");
            None
        }
    };

    // One signature is enough for the latest activity time; failures here
    // leave last_txn_time unset without flagging the entry.
    let last_txn_time = match rpc.get_signatures_for_address(&address, network, 1).await {
        Ok(signatures) => signatures.first().and_then(|s| s.block_time),
        Err(_) => None,
    };

    WatchlistEntry {
        error: balance.is_none(),
        balance,
        balance_loading: false,
        last_txn_time,
        address,
    }
}
