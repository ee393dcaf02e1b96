//! Solana network selection
//!
//! Identifies which cluster a request targets. The endpoint URL for each
//! network is fixed; overrides (private RPC providers) are handled by the
//! transport adapter, not here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target Solana cluster for an RPC call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolanaNetwork {
    Mainnet,
    Devnet,
}

impl SolanaNetwork {
    /// Public JSON-RPC endpoint for this cluster
    pub fn endpoint_url(&self) -> &'static str {
        match self {
            SolanaNetwork::Mainnet => "https://api.mainnet-beta.solana.com",
            SolanaNetwork::Devnet => "https://api.devnet.solana.com",
        }
    }
}

impl fmt::Display for SolanaNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolanaNetwork::Mainnet => write!(f, "mainnet"),
            SolanaNetwork::Devnet => write!(f, "devnet"),
        }
    }
}

impl FromStr for SolanaNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "mainnet-beta" => Ok(SolanaNetwork::Mainnet),
            "devnet" => Ok(SolanaNetwork::Devnet),
            other => Err(format!("unknown network '{}', expected mainnet or devnet", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        assert_eq!(
            SolanaNetwork::Mainnet.endpoint_url(),
            "https://api.mainnet-beta.solana.com"
        );
        assert_eq!(
            SolanaNetwork::Devnet.endpoint_url(),
            "https://api.devnet.solana.com"
        );
    }

    #[test]
    fn test_parse_network() {
        assert_eq!("mainnet".parse::<SolanaNetwork>().unwrap(), SolanaNetwork::Mainnet);
        assert_eq!("mainnet-beta".parse::<SolanaNetwork>().unwrap(), SolanaNetwork::Mainnet);
        assert_eq!("DEVNET".parse::<SolanaNetwork>().unwrap(), SolanaNetwork::Devnet);
        assert!("testnet".parse::<SolanaNetwork>().is_err());
    }
}
