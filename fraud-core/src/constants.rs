//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults shared by the
//! trainer and the prediction service.

use std::path::PathBuf;

/// Default model artifact path, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "fraud_model.json";

/// Default CSV file name inside the dataset cache directory
pub const DEFAULT_DATASET_FILE: &str = "onlinefraud.csv";

/// Public download of the labeled payments dataset (zip archive)
pub const DEFAULT_DATASET_URL: &str =
    "https://www.kaggle.com/api/v1/datasets/download/rupakroy/online-payments-fraud-detection-dataset";

/// Cache directory name under the platform cache dir
pub const DATASET_CACHE_DIR: &str = "fraud-scoring";

/// Seed used for the train/test split and the forest
pub const DEFAULT_SEED: u64 = 42;

/// Number of trees in the forest
pub const DEFAULT_TREE_COUNT: usize = 100;

/// Depth cap of every tree
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Fraction of rows held out for evaluation
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Crate version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model artifact path from environment or use default
pub fn get_model_path() -> PathBuf {
    std::env::var("MODEL_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH))
}

/// Get local dataset path from environment or use the cache location
pub fn get_dataset_path() -> PathBuf {
    std::env::var("DATASET_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DATASET_CACHE_DIR)
                .join(DEFAULT_DATASET_FILE)
        })
}

/// Get dataset download URL from environment or use the public default
///
/// An empty `DATASET_URL` disables downloading.
pub fn get_dataset_url() -> Option<String> {
    match std::env::var("DATASET_URL") {
        Ok(url) if url.trim().is_empty() => None,
        Ok(url) => Some(url),
        Err(_) => Some(DEFAULT_DATASET_URL.to_string()),
    }
}

/// Get training seed from environment or use default
pub fn get_seed() -> u64 {
    std::env::var("TRAIN_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED)
}

/// Get tree count from environment or use default
pub fn get_tree_count() -> usize {
    std::env::var("TRAIN_TREES")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or(DEFAULT_TREE_COUNT)
}

/// Get max tree depth from environment or use default
pub fn get_max_depth() -> usize {
    std::env::var("TRAIN_MAX_DEPTH")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or(DEFAULT_MAX_DEPTH)
}

/// Get held-out fraction from environment or use default
pub fn get_test_size() -> f64 {
    std::env::var("TRAIN_TEST_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&f: &f64| f > 0.0 && f < 1.0)
        .unwrap_or(DEFAULT_TEST_SIZE)
}

/// Minimum fraud recall below which the trainer warns
pub fn get_min_recall() -> Option<f64> {
    std::env::var("TRAIN_MIN_RECALL")
        .ok()
        .and_then(|s| s.parse().ok())
}
