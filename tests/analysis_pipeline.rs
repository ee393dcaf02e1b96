//! Wallet Analysis Pipeline Integration Tests
//!
//! Verifies the analysis components work together end to end:
//! 1. MockRpc -> SnapshotAggregator -> DefaultRiskEngine via WalletAnalyzer
//! 2. Watchlist store -> reconcile -> WatchlistRefresher fan-out
//!
//! All tests are deterministic (no real network calls) and use the
//! hand-written mock RPC port.

use std::collections::HashMap;
use std::sync::Arc;

use solscope::adapters::watchlist::MemoryWatchlistStore;
use solscope::application::{AnalysisState, ErrorKind, WalletAnalyzer, WatchlistRefresher};
use solscope::domain::{AccountInfo, RiskLevel, SignatureInfo, SolanaNetwork, TokenHolding};
use solscope::ports::mocks::MockRpc;
use solscope::ports::rpc::RpcError;
use solscope::ports::watchlist::WatchlistStore;

const WALLET: &str = "So11111111111111111111111111111111111111112";
const PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
const OTHER: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";

fn history(count: usize) -> Vec<SignatureInfo> {
    (0..count)
        .map(|i| SignatureInfo {
            signature: format!("sig{}", i),
            slot: 1_000 - i as u64,
            block_time: Some(1_700_000_000 - i as i64),
            err: false,
        })
        .collect()
}

#[tokio::test]
async fn analyze_established_wallet_end_to_end() {
    let rpc = Arc::new(
        MockRpc::new()
            .with_balance(WALLET, 2_500_000_000)
            .with_signatures(WALLET, history(50))
            .with_account(
                WALLET,
                Some(AccountInfo {
                    owner: "11111111111111111111111111111111".to_string(),
                    executable: false,
                    lamports: 2_500_000_000,
                    rent_epoch: 361,
                }),
            )
            .with_tokens(
                WALLET,
                vec![TokenHolding {
                    mint: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
                    amount: "12500000".to_string(),
                    decimals: 6,
                    ui_amount: 12.5,
                }],
            ),
    );
    let analyzer = WalletAnalyzer::new(Arc::clone(&rpc), SolanaNetwork::Mainnet);
    let state = analyzer.subscribe();
    assert_eq!(*state.borrow(), AnalysisState::Idle);

    let outcome = analyzer.analyze(WALLET).await;
    let score = match outcome {
        AnalysisState::Success(score) => score,
        other => panic!("expected success, got {:?}", other),
    };

    // 50 + 10 (solvent) + 20 (established) = 80
    assert_eq!(score.score, 80);
    assert_eq!(score.level, RiskLevel::Safe);
    assert_eq!(score.snapshot.transaction_count, 50);
    assert_eq!(score.snapshot.token_accounts.len(), 1);
    assert_eq!(score.snapshot.recent_signatures[0].signature, "sig0");

    // Terminal state published to observers
    assert!(matches!(*state.borrow(), AnalysisState::Success(_)));

    // Exactly the four aggregation calls went out
    assert_eq!(rpc.get_calls().len(), 4);
}

#[tokio::test]
async fn analyze_program_address_short_circuits() {
    let rpc = Arc::new(
        MockRpc::new()
            .with_balance(PROGRAM, 1)
            .with_signatures(PROGRAM, history(100))
            .with_account(
                PROGRAM,
                Some(AccountInfo {
                    owner: "BPFLoaderUpgradeab1e11111111111111111111111".to_string(),
                    executable: true,
                    lamports: 1,
                    rent_epoch: 0,
                }),
            ),
    );
    let analyzer = WalletAnalyzer::new(rpc, SolanaNetwork::Mainnet);

    match analyzer.analyze(PROGRAM).await {
        AnalysisState::Success(score) => {
            assert_eq!(score.score, 50);
            assert_eq!(score.level, RiskLevel::Warning);
            assert_eq!(score.reasons, vec!["Program address detected".to_string()]);
            assert!(score.positives.is_empty());
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn analyze_surfaces_classified_rate_limit() {
    let rpc = Arc::new(MockRpc::new().with_balance_error(
        WALLET,
        RpcError::Server("429 Too Many Requests".to_string()),
    ));
    let analyzer = WalletAnalyzer::new(rpc, SolanaNetwork::Mainnet);

    match analyzer.analyze(WALLET).await {
        AnalysisState::Error { message, kind } => {
            assert_eq!(kind, ErrorKind::RateLimited);
            assert!(message.contains("Too many requests"));
        }
        other => panic!("expected error, got {:?}", other),
    }
}

#[tokio::test]
async fn watchlist_store_feeds_refresher_with_partial_failure() {
    let store = MemoryWatchlistStore::new();
    assert!(store.add(WALLET).await);
    assert!(store.add(OTHER).await);
    assert!(!store.add("not-an-address").await);

    let addresses = store.subscribe().borrow().clone();
    assert_eq!(addresses.len(), 2);

    // New addresses reconcile into loading placeholders
    let placeholders = WatchlistRefresher::<MockRpc>::reconcile(&HashMap::new(), &addresses);
    assert!(placeholders.iter().all(|e| e.balance_loading && !e.error));

    let rpc = Arc::new(
        MockRpc::new()
            .with_balance(WALLET, 1_500_000_000)
            .with_signatures(
                WALLET,
                vec![SignatureInfo {
                    signature: "latest".to_string(),
                    slot: 99,
                    block_time: Some(1_700_000_123),
                    err: false,
                }],
            )
            .with_balance_error(OTHER, RpcError::Network("connection refused".to_string())),
    );
    let refresher = WatchlistRefresher::new(rpc, SolanaNetwork::Mainnet);

    let order: Vec<String> = placeholders.into_iter().map(|e| e.address).collect();
    let results = refresher.refresh(&order).await;
    assert_eq!(results.len(), 2);

    let healthy = &results[WALLET];
    assert!(!healthy.error);
    assert!(!healthy.balance_loading);
    assert!((healthy.balance.unwrap() - 1.5).abs() < f64::EPSILON);
    assert_eq!(healthy.last_txn_time, Some(1_700_000_123));

    let failed = &results[OTHER];
    assert!(failed.error);
    assert_eq!(failed.balance, None);

    // A second reconcile keeps the fetched data for surviving addresses
    let merged = WatchlistRefresher::<MockRpc>::reconcile(&results, &addresses);
    assert!(merged.iter().any(|e| e.balance == Some(1.5)));
}

#[tokio::test]
async fn new_analysis_overwrites_previous_terminal_state() {
    let rpc = Arc::new(
        MockRpc::new()
            .with_balance_error(WALLET, RpcError::Server("503 Service Unavailable".to_string()))
            .with_balance(OTHER, 1_000_000_000)
            .with_signatures(OTHER, history(12)),
    );
    let analyzer = WalletAnalyzer::new(rpc, SolanaNetwork::Devnet);
    let state = analyzer.subscribe();

    analyzer.analyze(WALLET).await;
    match &*state.borrow() {
        AnalysisState::Error { kind, .. } => assert_eq!(*kind, ErrorKind::ServerError),
        other => panic!("expected error, got {:?}", other),
    }

    analyzer.analyze(OTHER).await;
    match &*state.borrow() {
        // 50 + 10 (solvent) = 60, middling activity adds nothing
        AnalysisState::Success(score) => assert_eq!(score.score, 60),
        other => panic!("expected success, got {:?}", other),
    };
}
