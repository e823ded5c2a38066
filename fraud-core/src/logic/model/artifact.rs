//! Model Artifact - persisted forest plus the schema it was trained on
//!
//! The artifact records the feature layout, the type encoding and a
//! SHA-256 checksum of the forest. Loading verifies all three, so a stale
//! or hand-edited file is rejected instead of silently mis-scoring.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::forest::{ForestParams, RandomForest};
use super::ModelError;
use crate::logic::features::{LayoutInfo, TransactionType, FEATURE_COUNT};

/// Bumped when the artifact document structure changes
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub format_version: u32,
    pub layout: LayoutInfo,
    pub type_encoding: BTreeMap<String, u8>,
    pub params: ForestParams,
    pub trained_at: DateTime<Utc>,
    pub training_samples: usize,
    pub fraud_ratio: f64,
    /// Hex SHA-256 of the serialized forest
    pub checksum: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub metadata: ArtifactMetadata,
    pub forest: RandomForest,
}

impl ModelArtifact {
    /// Wrap a freshly fitted forest with the current schema
    pub fn new(
        forest: RandomForest,
        params: ForestParams,
        training_samples: usize,
        fraud_ratio: f64,
    ) -> Result<Self, ModelError> {
        let checksum = forest_checksum(&forest)?;
        Ok(Self {
            metadata: ArtifactMetadata {
                format_version: ARTIFACT_FORMAT_VERSION,
                layout: LayoutInfo::current(),
                type_encoding: TransactionType::encoding_table(),
                params,
                trained_at: Utc::now(),
                training_samples,
                fraud_ratio,
                checksum,
            },
            forest,
        })
    }

    /// Write the artifact as JSON
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let partial = path.with_extension("tmp");
        let mut writer = BufWriter::new(File::create(&partial)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        drop(writer);

        fs::rename(&partial, path)?;
        log::info!("Model artifact written to {}", path.display());
        Ok(())
    }

    /// Read and verify an artifact
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        log::info!("Loading model artifact from: {}", path.display());

        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let reader = BufReader::new(File::open(path)?);
        let artifact: ModelArtifact = serde_json::from_reader(reader)?;
        artifact.verify()?;

        log::info!(
            "Model artifact verified (trained {}, {} trees, layout v{})",
            artifact.metadata.trained_at,
            artifact.forest.tree_count(),
            artifact.metadata.layout.version
        );
        Ok(artifact)
    }

    /// Check format, schema, encoding and checksum
    pub fn verify(&self) -> Result<(), ModelError> {
        if self.metadata.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ModelError::UnsupportedFormat(self.metadata.format_version));
        }

        self.metadata.layout.validate()?;

        if self.metadata.type_encoding != TransactionType::encoding_table() {
            return Err(ModelError::EncodingMismatch);
        }

        let actual = forest_checksum(&self.forest)?;
        if actual != self.metadata.checksum {
            return Err(ModelError::ChecksumMismatch {
                expected: self.metadata.checksum.clone(),
                actual,
            });
        }

        if self.forest.n_features() != FEATURE_COUNT {
            return Err(ModelError::FeatureCountMismatch {
                expected: FEATURE_COUNT,
                actual: self.forest.n_features(),
            });
        }

        self.forest.validate()
    }

    pub fn into_forest(self) -> RandomForest {
        self.forest
    }
}

/// Hex SHA-256 over the canonical JSON form of the forest
pub fn forest_checksum(forest: &RandomForest) -> Result<String, ModelError> {
    let bytes = serde_json::to_vec(forest)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::{FeatureVector, Transaction};
    use crate::logic::model::Classifier;
    use ndarray::Array2;
    use tempfile::tempdir;

    fn fitted_forest() -> RandomForest {
        let mut values = Vec::new();
        let mut labels = Vec::new();
        for i in 0..200 {
            let amount = (i * 1000) as f64;
            let tx = Transaction {
                tx_type: TransactionType::ALL[i % 5],
                amount,
                old_balance_org: amount,
                new_balance_orig: 0.0,
                old_balance_dest: 0.0,
                new_balance_dest: amount,
            };
            values.extend_from_slice(FeatureVector::from_transaction(&tx, 1).as_slice());
            labels.push(u8::from(i >= 150));
        }
        let x = Array2::from_shape_vec((200, FEATURE_COUNT), values).unwrap();
        let params = ForestParams { n_trees: 5, max_depth: 4, ..Default::default() };
        RandomForest::fit(x.view(), &labels, &params).unwrap()
    }

    fn artifact() -> ModelArtifact {
        let forest = fitted_forest();
        ModelArtifact::new(forest, ForestParams::default(), 200, 0.25).unwrap()
    }

    #[test]
    fn test_save_and_load_preserves_predictions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("models").join("fraud_model.json");
        let original = artifact();
        original.save(&path).unwrap();

        let loaded = ModelArtifact::load(&path).unwrap();
        assert_eq!(loaded.metadata, original.metadata);

        let tx = Transaction {
            tx_type: TransactionType::Transfer,
            amount: 180_000.0,
            old_balance_org: 180_000.0,
            new_balance_orig: 0.0,
            old_balance_dest: 0.0,
            new_balance_dest: 180_000.0,
        };
        let vector = FeatureVector::for_serving(&tx);
        assert_eq!(
            loaded.forest.predict_proba(&vector).unwrap(),
            original.forest.predict_proba(&vector).unwrap()
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = ModelArtifact::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ModelError::NotFound(_)));
    }

    #[test]
    fn test_checksum_mismatch_rejected() {
        let mut artifact = artifact();
        artifact.metadata.checksum = "00".repeat(32);
        assert!(matches!(artifact.verify(), Err(ModelError::ChecksumMismatch { .. })));
    }

    #[test]
    fn test_layout_mismatch_rejected() {
        let mut artifact = artifact();
        artifact.metadata.layout.hash ^= 1;
        assert!(matches!(artifact.verify(), Err(ModelError::Feature(_))));
    }

    #[test]
    fn test_encoding_mismatch_rejected() {
        let mut artifact = artifact();
        artifact.metadata.type_encoding.insert("PAYMENT".to_string(), 5);
        assert!(matches!(artifact.verify(), Err(ModelError::EncodingMismatch)));
    }

    #[test]
    fn test_garbage_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fraud_model.json");
        fs::write(&path, b"not a model").unwrap();
        assert!(matches!(ModelArtifact::load(&path), Err(ModelError::Serialization(_))));
    }
}
