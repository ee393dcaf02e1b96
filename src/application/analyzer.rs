//! Wallet analysis controller
//!
//! Drives one-address analysis end to end (aggregate -> score) and
//! publishes a four-state result for presentation layers to observe. A new
//! `analyze` call supersedes any previous one: in-flight HTTP is not
//! cancelled, but a stale call's result is discarded instead of published.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::application::aggregator::SnapshotAggregator;
use crate::domain::network::SolanaNetwork;
use crate::domain::risk::{DefaultRiskEngine, RiskEngine, RiskScore};
use crate::ports::rpc::{RpcError, SolanaRpcPort};

/// User-facing error category, derived by substring heuristics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Wrong or malformed wallet address
    InvalidAddress,
    /// No connectivity or connection timeout
    NetworkError,
    /// Too many requests
    RateLimited,
    /// Solana RPC server issues
    ServerError,
    /// Fallback
    Unknown,
}

/// Observable lifecycle of one analysis
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    Idle,
    Loading,
    Success(RiskScore),
    Error { message: String, kind: ErrorKind },
}

/// Orchestrates fetch, aggregation, and scoring for single addresses
pub struct WalletAnalyzer<R> {
    aggregator: SnapshotAggregator<R>,
    engine: DefaultRiskEngine,
    state: watch::Sender<AnalysisState>,
    // Stale analyses compare against this before publishing
    generation: AtomicU64,
}

impl<R: SolanaRpcPort> WalletAnalyzer<R> {
    pub fn new(rpc: Arc<R>, network: SolanaNetwork) -> Self {
        let (state, _) = watch::channel(AnalysisState::Idle);
        Self {
            aggregator: SnapshotAggregator::new(rpc, network),
            engine: DefaultRiskEngine::new(),
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Override the signature query limit used by the aggregator
    pub fn with_signature_limit(mut self, limit: usize) -> Self {
        self.aggregator = self.aggregator.with_signature_limit(limit);
        self
    }

    /// Observable state stream. Starts at `Idle`; every `analyze` call
    /// moves it to `Loading` and then a terminal `Success` or `Error`.
    pub fn subscribe(&self) -> watch::Receiver<AnalysisState> {
        self.state.subscribe()
    }

    /// Analyze one address and publish the outcome. The terminal state is
    /// also returned so one-shot callers need not subscribe.
    pub async fn analyze(&self, address: &str) -> AnalysisState {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish_if_current(generation, AnalysisState::Loading);

        let sanitized = address.trim();
        tracing::info!(address = %sanitized, "starting wallet analysis");

        let outcome = match self.aggregator.build(sanitized).await {
            Ok(snapshot) => AnalysisState::Success(self.engine.calculate_risk(snapshot)),
            Err(err) => {
                let (message, kind) = classify_error(&err);
                tracing::warn!(address = %sanitized, %err, ?kind, "wallet analysis failed");
                AnalysisState::Error { message, kind }
            }
        };

        self.publish_if_current(generation, outcome.clone());
        outcome
    }

    // A newer analyze() owns the state channel; a superseded call must not
    // write to it, whether the stale value is Loading or a terminal state.
    fn publish_if_current(&self, generation: u64, next: AnalysisState) {
        if self.generation.load(Ordering::SeqCst) == generation {
            self.state.send_replace(next);
        }
    }
}

/// Map a transport error onto a user-facing message and category.
///
/// Second classification stage on top of [`RpcError`]: substring matching
/// over the lower-cased message. Deliberately heuristic - public endpoints
/// expose no structured error-code contract, so wording changes upstream
/// can degrade a match to `Unknown` but never to a wrong success.
pub fn classify_error(err: &RpcError) -> (String, ErrorKind) {
    let raw = err.to_string().to_lowercase();

    // Invalid address patterns
    if raw.contains("invalid param")
        || raw.contains("wrong size")
        || raw.contains("invalid base58")
        || raw.contains("invalid pubkey")
        || raw.contains("could not parse")
        || (raw.contains("invalid") && raw.contains("address"))
    {
        return (
            "The wallet address you entered is invalid. Please check and try again.".to_string(),
            ErrorKind::InvalidAddress,
        );
    }

    // Connectivity: transport-level failures plus common wording
    if matches!(err, RpcError::Network(_))
        || raw.contains("unable to resolve host")
        || raw.contains("failed to connect")
        || (raw.contains("network") && raw.contains("unreachable"))
        || raw.contains("no address associated")
        || raw.contains("connection refused")
    {
        return (
            "Unable to connect. Please check your internet connection and try again.".to_string(),
            ErrorKind::NetworkError,
        );
    }

    // Timeout
    if raw.contains("timeout") || raw.contains("timed out") {
        return (
            "The request timed out. The Solana network might be busy - please try again."
                .to_string(),
            ErrorKind::NetworkError,
        );
    }

    // Rate limiting
    if raw.contains("429") || raw.contains("too many requests") || raw.contains("rate limit") {
        return (
            "Too many requests. Please wait a moment and try again.".to_string(),
            ErrorKind::RateLimited,
        );
    }

    // Server errors (5xx and friends)
    if raw.contains("500")
        || raw.contains("502")
        || raw.contains("503")
        || raw.contains("internal server error")
        || raw.contains("service unavailable")
    {
        return (
            "The Solana network is experiencing issues. Please try again later.".to_string(),
            ErrorKind::ServerError,
        );
    }

    // Structured RPC errors without a recognizable pattern
    if matches!(err, RpcError::Rpc { .. }) {
        return (format!("Analysis failed: {}", err), ErrorKind::ServerError);
    }

    (
        "Something went wrong. Please try again.".to_string(),
        ErrorKind::Unknown,
    )
}
