//! Application Layer - Use-case orchestration
//!
//! Coordinates ports and domain logic into the two user-facing flows:
//! single-address analysis (aggregate then score) and concurrent
//! watchlist refresh.

pub mod aggregator;
pub mod analyzer;
pub mod refresher;

pub use aggregator::{SnapshotAggregator, SIGNATURE_LIMIT};
pub use analyzer::{classify_error, AnalysisState, ErrorKind, WalletAnalyzer};
pub use refresher::{WatchlistEntry, WatchlistRefresher};
