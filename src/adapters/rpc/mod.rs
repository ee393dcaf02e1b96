//! Solana JSON-RPC adapter
//!
//! Production implementation of [`crate::ports::rpc::SolanaRpcPort`] over
//! plain HTTPS POST, with envelope handling in `client` and tolerant
//! method-specific decoding in `decode`.

pub mod client;
pub mod decode;

pub use client::{HttpRpcClient, RpcClientConfig, TOKEN_PROGRAM_ID};
