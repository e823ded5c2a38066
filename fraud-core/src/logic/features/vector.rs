//! Feature Vector - model input for one transaction
//!
//! Carries the layout version and hash it was built with, so a vector
//! from another schema is caught before it reaches a model.

use serde::{Deserialize, Serialize};

use super::layout::{
    layout_hash, validate_layout, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION,
};
use super::transaction::Transaction;
use super::FeatureError;

/// Step value used for every scored transaction
pub const SERVING_STEP: u32 = 1;

/// Eight ordered feature values plus layout metadata
///
/// Built only through [`FeatureVector::from_transaction`] so training rows
/// and scored requests go through the same code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create from raw values with current version
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Encode a transaction at the given time step
    pub fn from_transaction(tx: &Transaction, step: u32) -> Self {
        Self::from_values([
            f64::from(step),
            f64::from(tx.tx_type.code()),
            tx.amount,
            tx.old_balance_org,
            tx.new_balance_orig,
            tx.old_balance_dest,
            tx.new_balance_dest,
            tx.sender_diff(),
        ])
    }

    /// Encode a transaction the way the scorer does
    pub fn for_serving(tx: &Transaction) -> Self {
        Self::from_transaction(tx, SERVING_STEP)
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<(), FeatureError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// Named values for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}
