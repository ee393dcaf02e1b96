//! HTTP Solana JSON-RPC client
//!
//! Builds JSON-RPC 2.0 envelopes, posts them over HTTPS with reqwest, and
//! normalizes every response into either a `result` element or a classified
//! [`RpcError`]. Method-specific result decoding lives in
//! [`super::decode`]; this file only knows the envelope.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::domain::network::SolanaNetwork;
use crate::domain::snapshot::{AccountInfo, SignatureInfo, TokenHolding};
use crate::ports::rpc::{RpcError, SolanaRpcPort};

use super::decode;

/// SPL Token program id, passed as the getTokenAccountsByOwner filter
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// HTTP RPC client configuration
#[derive(Debug, Clone)]
pub struct RpcClientConfig {
    /// Per-request timeout (connect + read + write)
    pub timeout: Duration,
    /// Optional endpoint override (private RPC provider); when set it is
    /// used for every network
    pub endpoint_override: Option<String>,
}

impl Default for RpcClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            endpoint_override: None,
        }
    }
}

/// HTTP-based implementation of [`SolanaRpcPort`]
#[derive(Debug)]
pub struct HttpRpcClient {
    http: Client,
    config: RpcClientConfig,
    // Request id source owned by this client instance, no ambient global
    // state. Ids only disambiguate the single in-flight request, so a
    // plain counter is enough.
    request_id: AtomicU64,
}

impl HttpRpcClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, RpcError> {
        Self::with_config(RpcClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: RpcClientConfig) -> Result<Self, RpcError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RpcError::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            request_id: AtomicU64::new(1),
        })
    }

    fn resolve_url(&self, network: SolanaNetwork) -> String {
        match &self.config.endpoint_override {
            Some(url) => url.clone(),
            None => network.endpoint_url().to_string(),
        }
    }

    /// Send one JSON-RPC request and return the envelope's `result`
    /// element.
    ///
    /// Failure classification, in order: transport error, non-2xx status,
    /// undecodable body, structured `error` member, envelope with neither
    /// `error` nor `result`.
    async fn call(
        &self,
        network: SolanaNetwork,
        method: &str,
        params: Value,
    ) -> Result<Value, RpcError> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let envelope = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let url = self.resolve_url(network);
        tracing::debug!(method, id, %network, "sending RPC request");

        let response = self
            .http
            .post(&url)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| RpcError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Server(format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|_| RpcError::Server("decode failure".to_string()))?;

        if let Some(error) = body.get("error") {
            if !error.is_null() {
                let code = error.get("code").and_then(Value::as_i64).unwrap_or(-1);
                let message = error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown error")
                    .to_string();
                tracing::warn!(method, code, %message, "RPC endpoint returned error");
                return Err(RpcError::Rpc { code, message });
            }
        }

        match body.get("result") {
            Some(result) => Ok(result.clone()),
            None => Err(RpcError::Server("missing result".to_string())),
        }
    }
}

#[async_trait]
impl SolanaRpcPort for HttpRpcClient {
    async fn get_balance(&self, address: &str, network: SolanaNetwork) -> Result<u64, RpcError> {
        let result = self.call(network, "getBalance", json!([address])).await?;
        decode::decode_balance(&result)
    }

    async fn get_signatures_for_address(
        &self,
        address: &str,
        network: SolanaNetwork,
        limit: usize,
    ) -> Result<Vec<SignatureInfo>, RpcError> {
        let result = self
            .call(
                network,
                "getSignaturesForAddress",
                json!([address, { "limit": limit }]),
            )
            .await?;
        decode::decode_signatures(&result)
    }

    async fn get_account_info(
        &self,
        address: &str,
        network: SolanaNetwork,
    ) -> Result<Option<AccountInfo>, RpcError> {
        let result = self
            .call(
                network,
                "getAccountInfo",
                json!([address, { "encoding": "jsonParsed" }]),
            )
            .await?;
        Ok(decode::decode_account_info(&result))
    }

    async fn get_token_accounts_by_owner(
        &self,
        address: &str,
        network: SolanaNetwork,
    ) -> Result<Vec<TokenHolding>, RpcError> {
        let result = self
            .call(
                network,
                "getTokenAccountsByOwner",
                json!([
                    address,
                    { "programId": TOKEN_PROGRAM_ID },
                    { "encoding": "jsonParsed" }
                ]),
            )
            .await?;
        Ok(decode::decode_token_accounts(&result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpRpcClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = RpcClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.endpoint_override.is_none());
    }

    #[test]
    fn test_endpoint_override_wins() {
        let client = HttpRpcClient::with_config(RpcClientConfig {
            timeout: Duration::from_secs(5),
            endpoint_override: Some("https://rpc.example.com".to_string()),
        })
        .unwrap();
        assert_eq!(
            client.resolve_url(SolanaNetwork::Mainnet),
            "https://rpc.example.com"
        );
        assert_eq!(
            client.resolve_url(SolanaNetwork::Devnet),
            "https://rpc.example.com"
        );
    }

    #[test]
    fn test_network_resolution_without_override() {
        let client = HttpRpcClient::new().unwrap();
        assert_eq!(
            client.resolve_url(SolanaNetwork::Mainnet),
            "https://api.mainnet-beta.solana.com"
        );
        assert_eq!(
            client.resolve_url(SolanaNetwork::Devnet),
            "https://api.devnet.solana.com"
        );
    }

    #[test]
    fn test_request_ids_are_monotonic() {
        let client = HttpRpcClient::new().unwrap();
        let first = client.request_id.fetch_add(1, Ordering::Relaxed);
        let second = client.request_id.fetch_add(1, Ordering::Relaxed);
        assert!(second > first);
    }
}
