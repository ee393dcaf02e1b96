//! Solana JSON-RPC port
//!
//! Thin contract over the four RPC operations the analysis pipeline needs.
//! This trait is intentionally minimal and contains no business logic - it
//! is a low-level transport abstraction over Solana's JSON-RPC API.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::network::SolanaNetwork;
use crate::domain::snapshot::{AccountInfo, SignatureInfo, TokenHolding};

/// Classified RPC transport failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RpcError {
    /// DNS, timeout, connection refused - the request never completed
    #[error("network request failed: {0}")]
    Network(String),

    /// Non-2xx HTTP status, malformed JSON body, or an envelope with
    /// neither `error` nor `result`
    #[error("RPC HTTP error: {0}")]
    Server(String),

    /// The endpoint returned a structured JSON-RPC error object
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Valid envelope, but a field required by this method was missing
    #[error("missing '{field}' in {method} response")]
    Decode {
        method: &'static str,
        field: &'static str,
    },
}

/// Low-level Solana JSON-RPC operations used by the analysis pipeline
#[async_trait]
pub trait SolanaRpcPort: Send + Sync {
    /// Balance of the address in lamports.
    async fn get_balance(&self, address: &str, network: SolanaNetwork) -> Result<u64, RpcError>;

    /// Confirmed transaction signatures involving the address, newest
    /// first, at most `limit` entries.
    async fn get_signatures_for_address(
        &self,
        address: &str,
        network: SolanaNetwork,
        limit: usize,
    ) -> Result<Vec<SignatureInfo>, RpcError>;

    /// Account metadata, or `None` when the address has no account.
    async fn get_account_info(
        &self,
        address: &str,
        network: SolanaNetwork,
    ) -> Result<Option<AccountInfo>, RpcError>;

    /// SPL token accounts owned by the address, filtered to positive
    /// balances.
    async fn get_token_accounts_by_owner(
        &self,
        address: &str,
        network: SolanaNetwork,
    ) -> Result<Vec<TokenHolding>, RpcError>;
}
