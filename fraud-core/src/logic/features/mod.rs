//! Features Module - Shared feature contract
//!
//! Everything that decides what the model sees lives here: the canonical
//! type encoding, the ordered layout, and the vector builder. The trainer
//! and the scorer both go through this module; neither keeps its own copy.

pub mod encoding;
pub mod layout;
pub mod transaction;
pub mod vector;

#[cfg(test)]
mod tests;

use thiserror::Error;

pub use encoding::TransactionType;
pub use layout::{LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use transaction::Transaction;
pub use vector::{FeatureVector, SERVING_STEP};

/// Feature contract violations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("unknown transaction type: {0}")]
    UnknownTransactionType(String),

    #[error(
        "feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), \
         got v{actual_version} (hash: {actual_hash:08x})"
    )]
    LayoutMismatch {
        expected_version: u8,
        expected_hash: u32,
        actual_version: u8,
        actual_hash: u32,
    },

    #[error("feature names mismatch: expected [{expected}], got [{actual}]")]
    FeatureNamesMismatch { expected: String, actual: String },
}
