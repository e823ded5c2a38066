//! Scoring Rules & Thresholds
//!
//! Constants and the deterministic balance-consistency check.
//! No model access here.

use crate::logic::features::Transaction;

// ============================================================================
// THRESHOLDS (Constants - fixed at runtime)
// ============================================================================

/// Absolute tolerance for balance movements, in currency units
///
/// Applies the same at every magnitude: 0.01 on a 5.00 payment and on a
/// 10,000,000.00 transfer.
pub const BALANCE_TOLERANCE: f64 = 0.01;

/// Heuristic-mode cut-off: larger amounts are flagged
pub const FALLBACK_AMOUNT_THRESHOLD: f64 = 100_000.0;

/// Heuristic-mode fraud probability (percent) above the cut-off
pub const FALLBACK_FRAUD_PROBABILITY: f64 = 95.0;

/// Heuristic-mode fraud probability (percent) at or below the cut-off
pub const FALLBACK_SAFE_FRAUD_PROBABILITY: f64 = 5.0;

/// Reason attached to rule-based rejections
pub const AMOUNT_MISMATCH_REASON: &str = "Amount mismatch between sender and receiver";

// ============================================================================
// BALANCE CONSISTENCY
// ============================================================================

/// Outcome of comparing the stated amount with both balance movements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceCheck {
    pub sender_diff: f64,
    pub receiver_diff: f64,
    pub sender_consistent: bool,
    pub receiver_consistent: bool,
}

impl BalanceCheck {
    pub fn is_consistent(&self) -> bool {
        self.sender_consistent && self.receiver_consistent
    }
}

/// Check that both parties' balances moved by `amount` within tolerance
pub fn check_balances(tx: &Transaction) -> BalanceCheck {
    let sender_diff = tx.sender_diff();
    let receiver_diff = tx.receiver_diff();

    BalanceCheck {
        sender_diff,
        receiver_diff,
        sender_consistent: (sender_diff - tx.amount).abs() < BALANCE_TOLERANCE,
        receiver_consistent: (receiver_diff - tx.amount).abs() < BALANCE_TOLERANCE,
    }
}

/// Heuristic used when no model is loaded
pub fn fallback_is_fraud(amount: f64) -> bool {
    amount > FALLBACK_AMOUNT_THRESHOLD
}
