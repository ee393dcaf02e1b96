//! Method-specific RPC result decoders
//!
//! Each decoder takes the generic `result` element returned by the
//! envelope layer and produces a typed shape. Optional fields never fail:
//! the fallback applied for every absent field is listed once in
//! [`defaults`] so the decode contract can be audited and tested without
//! any network I/O.

use serde_json::Value;

use crate::domain::snapshot::{AccountInfo, SignatureInfo, TokenHolding};
use crate::ports::rpc::RpcError;

/// Fallback values for absent optional wire fields, one table for the
/// whole decode layer.
pub mod defaults {
    /// `getSignaturesForAddress[].slot`
    pub const SLOT: u64 = 0;
    /// `getAccountInfo.value.owner`
    pub const OWNER: &str = "";
    /// `getAccountInfo.value.executable`
    pub const EXECUTABLE: bool = false;
    /// `getAccountInfo.value.lamports`
    pub const LAMPORTS: u64 = 0;
    /// `getAccountInfo.value.rentEpoch` (also the overflow fallback)
    pub const RENT_EPOCH: u64 = 0;
    /// `tokenAmount.amount`
    pub const TOKEN_AMOUNT: &str = "0";
    /// `tokenAmount.decimals`
    pub const TOKEN_DECIMALS: u8 = 0;
    /// `tokenAmount.uiAmount`
    pub const TOKEN_UI_AMOUNT: f64 = 0.0;
}

/// Decode a `getBalance` result: `{ "context": ..., "value": <lamports> }`.
/// A missing `value` is a decode failure, not a zero balance.
pub fn decode_balance(result: &Value) -> Result<u64, RpcError> {
    result
        .get("value")
        .and_then(Value::as_u64)
        .ok_or(RpcError::Decode {
            method: "getBalance",
            field: "value",
        })
}

/// Decode a `getSignaturesForAddress` result array.
///
/// Entry order is preserved exactly as the endpoint returned it (newest
/// first). `signature` is required per entry; everything else defaults.
pub fn decode_signatures(result: &Value) -> Result<Vec<SignatureInfo>, RpcError> {
    let entries = result.as_array().ok_or(RpcError::Decode {
        method: "getSignaturesForAddress",
        field: "result",
    })?;

    entries
        .iter()
        .map(|entry| {
            let signature = entry
                .get("signature")
                .and_then(Value::as_str)
                .ok_or(RpcError::Decode {
                    method: "getSignaturesForAddress",
                    field: "signature",
                })?
                .to_string();
            let slot = entry
                .get("slot")
                .and_then(Value::as_u64)
                .unwrap_or(defaults::SLOT);
            let block_time = entry.get("blockTime").and_then(Value::as_i64);
            // Only whether the transaction failed matters; the specific
            // error object is not preserved.
            let err = entry.get("err").map(|e| !e.is_null()).unwrap_or(false);

            Ok(SignatureInfo {
                signature,
                slot,
                block_time,
                err,
            })
        })
        .collect()
}

/// Decode a `getAccountInfo` result.
///
/// A null result or null `value` means the address has no account and
/// yields `None` - never an error. Field fallbacks come from [`defaults`].
pub fn decode_account_info(result: &Value) -> Option<AccountInfo> {
    if result.is_null() {
        return None;
    }
    let value = result.get("value")?;
    if value.is_null() {
        return None;
    }

    let owner = value
        .get("owner")
        .and_then(Value::as_str)
        .unwrap_or(defaults::OWNER)
        .to_string();
    let executable = value
        .get("executable")
        .and_then(Value::as_bool)
        .unwrap_or(defaults::EXECUTABLE);
    let lamports = value
        .get("lamports")
        .and_then(Value::as_u64)
        .unwrap_or(defaults::LAMPORTS);
    let rent_epoch = decode_rent_epoch(value.get("rentEpoch"));

    Some(AccountInfo {
        owner,
        executable,
        lamports,
        rent_epoch,
    })
}

/// rentEpoch is a u64-range counter the endpoint serializes as a plain
/// number or, beyond i64 range, as a decimal string. Overflow or garbage
/// falls back to 0 instead of failing the whole account decode.
fn decode_rent_epoch(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(defaults::RENT_EPOCH),
        Some(Value::String(s)) => s.parse().unwrap_or(defaults::RENT_EPOCH),
        _ => defaults::RENT_EPOCH,
    }
}

/// Decode a `getTokenAccountsByOwner` result.
///
/// Entries with malformed nested structure or a missing mint are silently
/// dropped; only holdings with a positive ui amount are kept.
pub fn decode_token_accounts(result: &Value) -> Vec<TokenHolding> {
    let entries = match result.get("value").and_then(Value::as_array) {
        Some(entries) => entries,
        None => return Vec::new(),
    };

    entries
        .iter()
        .filter_map(|entry| {
            let info = entry
                .get("account")?
                .get("data")?
                .get("parsed")?
                .get("info")?;
            let token_amount = info.get("tokenAmount")?;

            let mint = info.get("mint")?.as_str()?.to_string();
            let amount = token_amount
                .get("amount")
                .and_then(Value::as_str)
                .unwrap_or(defaults::TOKEN_AMOUNT)
                .to_string();
            let decimals = token_amount
                .get("decimals")
                .and_then(Value::as_u64)
                .unwrap_or(defaults::TOKEN_DECIMALS as u64) as u8;
            let ui_amount = token_amount
                .get("uiAmount")
                .and_then(Value::as_f64)
                .unwrap_or(defaults::TOKEN_UI_AMOUNT);

            if ui_amount > 0.0 {
                Some(TokenHolding {
                    mint,
                    amount,
                    decimals,
                    ui_amount,
                })
            } else {
                None
            }
        })
        .collect()
}
