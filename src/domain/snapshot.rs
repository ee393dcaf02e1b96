//! Wallet snapshot types
//!
//! A [`WalletSnapshot`] is the immutable merge of everything the pipeline
//! learned about one address from a single round of RPC calls. A new
//! analysis always produces a new snapshot; nothing is cached or mutated.

use serde::{Deserialize, Serialize};

/// Lamports per SOL (1 SOL = 10^9 lamports)
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Convert a lamport amount to whole SOL
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Check that a string is a plausible base58-encoded Solana public key.
///
/// Length bounds (32-44 chars) match the textual encoding of a 32-byte key.
/// This guards watchlist input only; analysis sends the raw string to the
/// endpoint and lets it reject malformed keys.
pub fn is_valid_address(address: &str) -> bool {
    (32..=44).contains(&address.len()) && bs58::decode(address).into_vec().is_ok()
}

/// One confirmed transaction signature involving an address.
///
/// Order is whatever the endpoint returned (newest first); the pipeline
/// never re-sorts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureInfo {
    /// Transaction signature (base58)
    pub signature: String,
    /// Slot the transaction was processed in
    pub slot: u64,
    /// Block time as epoch seconds, when the endpoint reports one
    pub block_time: Option<i64>,
    /// True when the transaction failed on chain
    pub err: bool,
}

/// An SPL token holding with a positive balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenHolding {
    /// Token mint address
    pub mint: String,
    /// Raw amount in base units, string-encoded as on the wire
    pub amount: String,
    /// Mint decimals
    pub decimals: u8,
    /// UI-normalized amount (amount / 10^decimals)
    pub ui_amount: f64,
}

/// Parsed `getAccountInfo` value for an existing account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Owning program address
    pub owner: String,
    /// True when the account hosts a program rather than user funds
    pub executable: bool,
    /// Account balance in lamports
    pub lamports: u64,
    /// Rent epoch counter; 0 when the wire value overflows or is malformed
    pub rent_epoch: u64,
}

/// Immutable merge of one round of RPC facts about an address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    /// Base58 wallet address this snapshot describes
    pub address: String,
    /// SOL balance in lamports
    pub balance: u64,
    /// Number of signatures observed, capped by the query limit
    pub transaction_count: usize,
    /// True when the address is a program account
    pub is_executable: bool,
    /// Token holdings with positive balances, endpoint order
    pub token_accounts: Vec<TokenHolding>,
    /// Recent signatures, newest first
    pub recent_signatures: Vec<SignatureInfo>,
}

impl WalletSnapshot {
    /// Construct a snapshot from low-level RPC results.
    ///
    /// `transaction_count` is the length of the signature list, not the
    /// total on-chain count - consumers must treat values at the query
    /// limit as "at least that many".
    pub fn from_rpc_data(
        address: String,
        balance: u64,
        history: Vec<SignatureInfo>,
        account_info: Option<AccountInfo>,
        token_accounts: Vec<TokenHolding>,
    ) -> Self {
        Self {
            address,
            balance,
            transaction_count: history.len(),
            is_executable: account_info.map(|info| info.executable).unwrap_or(false),
            token_accounts,
            recent_signatures: history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sig(signature: &str, block_time: Option<i64>) -> SignatureInfo {
        SignatureInfo {
            signature: signature.to_string(),
            slot: 100,
            block_time,
            err: false,
        }
    }

    #[test]
    fn test_lamports_to_sol() {
        assert_relative_eq!(lamports_to_sol(LAMPORTS_PER_SOL), 1.0);
        assert_relative_eq!(lamports_to_sol(500_000_000), 0.5);
        assert_relative_eq!(lamports_to_sol(0), 0.0);
    }

    #[test]
    fn test_address_validation() {
        assert!(is_valid_address("So11111111111111111111111111111111111111112"));
        assert!(is_valid_address("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"));
        // Too short
        assert!(!is_valid_address("abc"));
        // Contains characters outside the base58 alphabet (0, O, I, l)
        assert!(!is_valid_address("0OIl111111111111111111111111111111111111111"));
        assert!(!is_valid_address(""));
    }

    #[test]
    fn test_transaction_count_tracks_history_length() {
        let history = vec![sig("a", Some(1_700_000_000)), sig("b", None)];
        let snapshot = WalletSnapshot::from_rpc_data(
            "addr".to_string(),
            LAMPORTS_PER_SOL,
            history,
            None,
            Vec::new(),
        );
        assert_eq!(snapshot.transaction_count, 2);
        assert_eq!(snapshot.recent_signatures.len(), 2);
        // First entry stays first - endpoint order is preserved
        assert_eq!(snapshot.recent_signatures[0].signature, "a");
    }

    #[test]
    fn test_missing_account_info_means_not_executable() {
        let snapshot =
            WalletSnapshot::from_rpc_data("addr".to_string(), 0, Vec::new(), None, Vec::new());
        assert!(!snapshot.is_executable);
    }

    #[test]
    fn test_executable_copied_from_account_info() {
        let info = AccountInfo {
            owner: "BPFLoaderUpgradeab1e11111111111111111111111".to_string(),
            executable: true,
            lamports: 1,
            rent_epoch: 361,
        };
        let snapshot = WalletSnapshot::from_rpc_data(
            "addr".to_string(),
            0,
            Vec::new(),
            Some(info),
            Vec::new(),
        );
        assert!(snapshot.is_executable);
    }
}
