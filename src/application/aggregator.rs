//! Wallet snapshot aggregation
//!
//! Issues the fixed set of RPC calls for one address in parallel and
//! merges the results into a single [`WalletSnapshot`]. Fails fast: if any
//! of the four calls errors, the whole build fails with that error - a
//! single-address analysis never partially succeeds.

use std::sync::Arc;

use crate::domain::network::SolanaNetwork;
use crate::domain::snapshot::WalletSnapshot;
use crate::ports::rpc::{RpcError, SolanaRpcPort};

/// Signatures requested per analysis; transaction_count is capped by this
pub const SIGNATURE_LIMIT: usize = 50;

/// Builds [`WalletSnapshot`]s from the four per-address RPC calls
pub struct SnapshotAggregator<R> {
    rpc: Arc<R>,
    network: SolanaNetwork,
    signature_limit: usize,
}

impl<R: SolanaRpcPort> SnapshotAggregator<R> {
    pub fn new(rpc: Arc<R>, network: SolanaNetwork) -> Self {
        Self {
            rpc,
            network,
            signature_limit: SIGNATURE_LIMIT,
        }
    }

    /// Override the signature query limit (watchlist probes use 1)
    pub fn with_signature_limit(mut self, limit: usize) -> Self {
        self.signature_limit = limit;
        self
    }

    /// Fetch balance, history, account info, and token accounts
    /// concurrently and merge them. The first error aborts the build.
    pub async fn build(&self, address: &str) -> Result<WalletSnapshot, RpcError> {
        let (balance, history, account_info, token_accounts) = tokio::try_join!(
            self.rpc.get_balance(address, self.network),
            self.rpc
                .get_signatures_for_address(address, self.network, self.signature_limit),
            self.rpc.get_account_info(address, self.network),
            self.rpc.get_token_accounts_by_owner(address, self.network),
        )?;

        tracing::debug!(
            address,
            balance,
            signatures = history.len(),
            tokens = token_accounts.len(),
            "aggregated wallet snapshot"
        );

        Ok(WalletSnapshot::from_rpc_data(
            address.to_string(),
            balance,
            history,
            account_info,
            token_accounts,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::{AccountInfo, SignatureInfo, TokenHolding};
    use crate::ports::mocks::MockRpc;

    const ADDR: &str = "So11111111111111111111111111111111111111112";

    fn sig(signature: &str) -> SignatureInfo {
        SignatureInfo {
            signature: signature.to_string(),
            slot: 1,
            block_time: Some(1_700_000_000),
            err: false,
        }
    }

    #[tokio::test]
    async fn test_build_merges_all_four_calls() {
        let rpc = MockRpc::new()
            .with_balance(ADDR, 1_000_000_000)
            .with_signatures(ADDR, vec![sig("a"), sig("b")])
            .with_account(
                ADDR,
                Some(AccountInfo {
                    owner: "SystemProgram".to_string(),
                    executable: false,
                    lamports: 1_000_000_000,
                    rent_epoch: 0,
                }),
            )
            .with_tokens(
                ADDR,
                vec![TokenHolding {
                    mint: "MintA".to_string(),
                    amount: "5".to_string(),
                    decimals: 0,
                    ui_amount: 5.0,
                }],
            );
        let rpc = Arc::new(rpc);
        let aggregator = SnapshotAggregator::new(Arc::clone(&rpc), SolanaNetwork::Mainnet);

        let snapshot = aggregator.build(ADDR).await.unwrap();
        assert_eq!(snapshot.address, ADDR);
        assert_eq!(snapshot.balance, 1_000_000_000);
        assert_eq!(snapshot.transaction_count, 2);
        assert!(!snapshot.is_executable);
        assert_eq!(snapshot.token_accounts.len(), 1);

        // Exactly one call per method
        let calls = rpc.get_calls();
        assert_eq!(calls.len(), 4);
    }

    #[tokio::test]
    async fn test_build_fails_fast_on_any_error() {
        let rpc = Arc::new(MockRpc::new().with_balance_error(
            ADDR,
            RpcError::Rpc {
                code: -32602,
                message: "Invalid param: WrongSize".to_string(),
            },
        ));
        let aggregator = SnapshotAggregator::new(rpc, SolanaNetwork::Mainnet);

        let err = aggregator.build(ADDR).await.unwrap_err();
        assert!(matches!(err, RpcError::Rpc { code: -32602, .. }));
    }

    #[tokio::test]
    async fn test_missing_account_means_not_executable() {
        let rpc = Arc::new(MockRpc::new().with_balance(ADDR, 10).with_account(ADDR, None));
        let aggregator = SnapshotAggregator::new(rpc, SolanaNetwork::Devnet);

        let snapshot = aggregator.build(ADDR).await.unwrap();
        assert!(!snapshot.is_executable);
    }

    #[tokio::test]
    async fn test_signature_limit_caps_history() {
        let history: Vec<SignatureInfo> = (0..10).map(|i| sig(&format!("s{}", i))).collect();
        let rpc = Arc::new(MockRpc::new().with_signatures(ADDR, history));
        let aggregator =
            SnapshotAggregator::new(rpc, SolanaNetwork::Mainnet).with_signature_limit(3);

        let snapshot = aggregator.build(ADDR).await.unwrap();
        assert_eq!(snapshot.transaction_count, 3);
    }
}
