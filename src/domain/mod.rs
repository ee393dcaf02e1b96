//! Domain Layer - Core business types for SolScope wallet analysis
//!
//! This module contains pure domain types and logic with no external
//! dependencies. Nothing here performs I/O: snapshots come in through
//! the ports layer, risk scores come out.

pub mod network;
pub mod risk;
pub mod snapshot;

pub use network::SolanaNetwork;
pub use risk::{DefaultRiskEngine, RiskEngine, RiskLevel, RiskScore};
pub use snapshot::{
    is_valid_address, lamports_to_sol, AccountInfo, SignatureInfo, TokenHolding, WalletSnapshot,
    LAMPORTS_PER_SOL,
};
