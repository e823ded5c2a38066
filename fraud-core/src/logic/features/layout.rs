//! Feature Layout - ordered input schema of the model
//!
//! The trainer writes this layout into the model artifact and the scorer
//! refuses artifacts built against a different one.
//!
//! Bump FEATURE_VERSION on any added, removed or reordered feature, and on
//! any change to the type encoding table.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use super::encoding::TransactionType;
use super::FeatureError;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Column names, in vector order
pub const FEATURE_LAYOUT: &[&str] = &[
    "step",            // 0: Time step (constant 1 when serving)
    "type",            // 1: Encoded transaction type
    "amount",          // 2: Stated transaction amount
    "oldbalanceOrg",   // 3: Sender balance before
    "newbalanceOrig",  // 4: Sender balance after
    "oldbalanceDest",  // 5: Receiver balance before
    "newbalanceDest",  // 6: Receiver balance after
    "actualAmount",    // 7: oldbalanceOrg - newbalanceOrig
];

/// Must equal FEATURE_LAYOUT.len()
pub const FEATURE_COUNT: usize = 8;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout and the type encoding table
pub fn compute_layout_hash() -> u32 {
    hash_schema(
        FEATURE_VERSION,
        FEATURE_LAYOUT,
        TransactionType::ALL.iter().map(|t| (t.label(), t.code())),
    )
}

fn hash_schema<'a>(
    version: u8,
    names: &[&str],
    encoding: impl IntoIterator<Item = (&'a str, u8)>,
) -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[version]);

    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    // Encoding is part of the schema: a code shift is as breaking as a reorder
    for (label, code) in encoding {
        hasher.update(label.as_bytes());
        hasher.update(&[code]);
    }

    hasher.finalize()
}

/// Hash of the compiled-in layout
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout descriptor stored in model artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Validate that this layout matches the one compiled into the binary
    pub fn validate(&self) -> Result<(), FeatureError> {
        validate_layout(self.version, self.hash)?;

        if self.feature_names.len() != FEATURE_COUNT
            || self.feature_names.iter().zip(FEATURE_LAYOUT).any(|(a, b)| a != b)
        {
            return Err(FeatureError::FeatureNamesMismatch {
                expected: FEATURE_LAYOUT.join(","),
                actual: self.feature_names.join(","),
            });
        }

        Ok(())
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Reject a version/hash pair that differs from the compiled-in layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), FeatureError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(FeatureError::LayoutMismatch {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}
