//! Transaction Type Encoding
//!
//! The one encoding table used by both the trainer and the scorer.
//! Labels are matched case-insensitively; unknown labels are an error and
//! are never folded into a real category.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FeatureError;

/// Transaction category with its integer model code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    CashOut,
    Transfer,
    Payment,
    CashIn,
    Debit,
}

impl TransactionType {
    /// All categories in code order
    pub const ALL: [TransactionType; 5] = [
        TransactionType::CashOut,
        TransactionType::Transfer,
        TransactionType::Payment,
        TransactionType::CashIn,
        TransactionType::Debit,
    ];

    /// Integer code fed to the model
    pub fn code(self) -> u8 {
        match self {
            TransactionType::CashOut => 0,
            TransactionType::Transfer => 1,
            TransactionType::Payment => 2,
            TransactionType::CashIn => 3,
            TransactionType::Debit => 4,
        }
    }

    /// Canonical upper-case label
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::CashOut => "CASH_OUT",
            TransactionType::Transfer => "TRANSFER",
            TransactionType::Payment => "PAYMENT",
            TransactionType::CashIn => "CASH_IN",
            TransactionType::Debit => "DEBIT",
        }
    }

    /// Parse a label, ignoring case and surrounding whitespace
    pub fn from_label(label: &str) -> Result<Self, FeatureError> {
        let normalized = label.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.label() == normalized)
            .ok_or_else(|| FeatureError::UnknownTransactionType(label.to_string()))
    }

    /// Label → code table, stored in the model artifact
    pub fn encoding_table() -> BTreeMap<String, u8> {
        Self::ALL
            .into_iter()
            .map(|t| (t.label().to_string(), t.code()))
            .collect()
    }
}

impl FromStr for TransactionType {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
