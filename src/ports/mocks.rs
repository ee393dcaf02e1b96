//! Hand-written mock RPC port for deterministic tests
//!
//! Records calls and serves configured per-address responses without any
//! network I/O. Missing entries fall back to an empty-but-valid wallet so
//! tests only configure what they care about.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::network::SolanaNetwork;
use crate::domain::snapshot::{AccountInfo, SignatureInfo, TokenHolding};
use crate::ports::rpc::{RpcError, SolanaRpcPort};

/// Mock RPC port with per-address canned responses
#[derive(Debug, Default)]
pub struct MockRpc {
    balances: Mutex<HashMap<String, Result<u64, RpcError>>>,
    signatures: Mutex<HashMap<String, Result<Vec<SignatureInfo>, RpcError>>>,
    accounts: Mutex<HashMap<String, Result<Option<AccountInfo>, RpcError>>>,
    tokens: Mutex<HashMap<String, Result<Vec<TokenHolding>, RpcError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockRpc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(self, address: &str, lamports: u64) -> Self {
        self.balances
            .lock()
            .unwrap()
            .insert(address.to_string(), Ok(lamports));
        self
    }

    pub fn with_balance_error(self, address: &str, err: RpcError) -> Self {
        self.balances
            .lock()
            .unwrap()
            .insert(address.to_string(), Err(err));
        self
    }

    pub fn with_signatures(self, address: &str, signatures: Vec<SignatureInfo>) -> Self {
        self.signatures
            .lock()
            .unwrap()
            .insert(address.to_string(), Ok(signatures));
        self
    }

    pub fn with_signatures_error(self, address: &str, err: RpcError) -> Self {
        self.signatures
            .lock()
            .unwrap()
            .insert(address.to_string(), Err(err));
        self
    }

    pub fn with_account(self, address: &str, account: Option<AccountInfo>) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(address.to_string(), Ok(account));
        self
    }

    pub fn with_tokens(self, address: &str, tokens: Vec<TokenHolding>) -> Self {
        self.tokens
            .lock()
            .unwrap()
            .insert(address.to_string(), Ok(tokens));
        self
    }

    /// All recorded calls as "method:address" strings, in call order
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &str, address: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", method, address));
    }
}

#[async_trait]
impl SolanaRpcPort for MockRpc {
    async fn get_balance(&self, address: &str, _network: SolanaNetwork) -> Result<u64, RpcError> {
        self.record("getBalance", address);
        self.balances
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or(Ok(0))
    }

    async fn get_signatures_for_address(
        &self,
        address: &str,
        _network: SolanaNetwork,
        limit: usize,
    ) -> Result<Vec<SignatureInfo>, RpcError> {
        self.record("getSignaturesForAddress", address);
        self.signatures
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
            .map(|mut sigs| {
                sigs.truncate(limit);
                sigs
            })
    }

    async fn get_account_info(
        &self,
        address: &str,
        _network: SolanaNetwork,
    ) -> Result<Option<AccountInfo>, RpcError> {
        self.record("getAccountInfo", address);
        self.accounts
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or(Ok(None))
    }

    async fn get_token_accounts_by_owner(
        &self,
        address: &str,
        _network: SolanaNetwork,
    ) -> Result<Vec<TokenHolding>, RpcError> {
        self.record("getTokenAccountsByOwner", address);
        self.tokens
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
