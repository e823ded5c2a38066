//! Model Module - Fraud classifier
//!
//! Random forest fitting and inference, plus the on-disk artifact.
//! Scoring only sees the [`Classifier`] trait, so the model can be swapped
//! or stubbed without touching the rules.

pub mod classifier;
pub mod tree;
pub mod forest;
pub mod artifact;

use std::path::PathBuf;

use thiserror::Error;

use crate::logic::features::FeatureError;

// Re-export common types
pub use artifact::{ArtifactMetadata, ModelArtifact, ARTIFACT_FORMAT_VERSION};
pub use classifier::{ClassProbabilities, Classifier, CLASS_FRAUD, CLASS_SAFE};
pub use forest::{balanced_class_weights, ForestParams, RandomForest};

/// Model fitting, inference and artifact errors
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("feature matrix has {rows} rows but {labels} labels")]
    ShapeMismatch { rows: usize, labels: usize },

    #[error("training labels contain no samples of class {0}")]
    MissingClass(u8),

    #[error("label must be 0 or 1, got {0}")]
    InvalidLabel(u8),

    #[error("invalid model parameters: {0}")]
    InvalidParams(String),

    #[error("expected {expected} features, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("tree {tree} is malformed: {reason}")]
    MalformedTree { tree: usize, reason: String },

    #[error("model not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported artifact format version {0}")]
    UnsupportedFormat(u32),

    #[error("artifact type encoding differs from the built-in table")]
    EncodingMismatch,

    #[error("artifact checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error("artifact serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
