//! Transaction - the raw record both programs start from

use serde::{Deserialize, Serialize};

use super::encoding::TransactionType;

/// A single transaction with both parties' balances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub tx_type: TransactionType,
    pub amount: f64,
    pub old_balance_org: f64,
    pub new_balance_orig: f64,
    pub old_balance_dest: f64,
    pub new_balance_dest: f64,
}

impl Transaction {
    /// Amount that actually left the sender
    pub fn sender_diff(&self) -> f64 {
        self.old_balance_org - self.new_balance_orig
    }

    /// Amount that actually reached the receiver
    pub fn receiver_diff(&self) -> f64 {
        self.new_balance_dest - self.old_balance_dest
    }
}
