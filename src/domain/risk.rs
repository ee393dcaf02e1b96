//! Wallet risk scoring engine
//!
//! Pure, deterministic mapping from a [`WalletSnapshot`] to a bounded
//! [`RiskScore`]. Rules are additive and independent; the final score is
//! clamped into [5, 95] so a wallet is never presented as perfectly safe
//! or perfectly doomed.

use serde::{Deserialize, Serialize};

use crate::domain::snapshot::WalletSnapshot;

const BASE_SCORE: i32 = 50;
const MIN_SCORE: i32 = 5;
const MAX_SCORE: i32 = 95;

/// 0.01 SOL - anything below is dust
const DUST_THRESHOLD: u64 = 10_000_000;
/// 0.5 SOL - enough to cover fees and rent
const SOLVENT_THRESHOLD: u64 = 500_000_000;
/// 5.0 SOL
const HIGH_VALUE_THRESHOLD: u64 = 5_000_000_000;

/// Threshold under which a wallet counts as new/low-activity
const LOW_ACTIVITY_TXN_COUNT: usize = 10;
/// Signature count (capped by the query limit) treated as established history
const ESTABLISHED_TXN_COUNT: usize = 50;

/// Risk band derived from the numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Safe,
    Warning,
    Critical,
    Unknown,
}

impl RiskLevel {
    /// Fixed score bands: [5,39] critical, [40,69] warning, [70,95] safe
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=39 => RiskLevel::Critical,
            40..=69 => RiskLevel::Warning,
            _ => RiskLevel::Safe,
        }
    }
}

/// Explainable risk assessment for one wallet snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    /// Bounded score, always within [5, 95]
    pub score: u8,
    /// Band derived from `score`
    pub level: RiskLevel,
    /// Negative signals, in rule evaluation order
    pub reasons: Vec<String>,
    /// Positive signals, in rule evaluation order
    pub positives: Vec<String>,
    /// The snapshot this score was derived from
    pub snapshot: WalletSnapshot,
}

/// Risk analysis engine contract
pub trait RiskEngine: Send + Sync {
    /// Analyze the snapshot and return a conservative, bounded score.
    /// Total function: never fails, same input yields same output.
    fn calculate_risk(&self, snapshot: WalletSnapshot) -> RiskScore;
}

/// Default heuristic engine scoring balance and activity signals
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRiskEngine;

impl DefaultRiskEngine {
    pub fn new() -> Self {
        Self
    }
}

impl RiskEngine for DefaultRiskEngine {
    fn calculate_risk(&self, snapshot: WalletSnapshot) -> RiskScore {
        // Program accounts hold code, not user funds - the wallet
        // heuristics below do not apply.
        if snapshot.is_executable {
            return RiskScore {
                score: 50,
                level: RiskLevel::Warning,
                reasons: vec!["Program address detected".to_string()],
                positives: Vec::new(),
                snapshot,
            };
        }

        let mut reasons = Vec::new();
        let mut positives = Vec::new();
        let mut delta: i32 = 0;

        // Rule group 1: balance
        if snapshot.balance == 0 {
            delta -= 30;
            reasons.push("Wallet is completely empty".to_string());
        } else if snapshot.balance < DUST_THRESHOLD {
            delta -= 10;
            reasons.push("Very low balance (Dust)".to_string());
        }

        // Cumulative balance bonuses
        if snapshot.balance >= SOLVENT_THRESHOLD {
            delta += 10;
            positives.push("Sufficient SOL balance".to_string());
        }
        if snapshot.balance >= HIGH_VALUE_THRESHOLD {
            delta += 10;
            positives.push("High value wallet".to_string());
        }

        // Rule group 2: activity
        if snapshot.transaction_count == 0 {
            delta -= 40;
            reasons.push("No transaction history".to_string());
        } else if snapshot.transaction_count < LOW_ACTIVITY_TXN_COUNT {
            delta -= 20;
            reasons.push("New or low-activity wallet".to_string());
        } else if snapshot.transaction_count >= ESTABLISHED_TXN_COUNT {
            delta += 20;
            positives.push("Established transaction history".to_string());
        }

        let score = (BASE_SCORE + delta).clamp(MIN_SCORE, MAX_SCORE) as u8;

        RiskScore {
            score,
            level: RiskLevel::from_score(score),
            reasons,
            positives,
            snapshot,
        }
    }
}
