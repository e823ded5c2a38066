//! Trainer configuration

use std::path::PathBuf;

use crate::constants;
use crate::logic::dataset::DatasetSource;
use crate::logic::model::ForestParams;

/// Everything the trainer needs, read from the environment
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub dataset: DatasetSource,
    pub model_path: PathBuf,
    pub forest: ForestParams,
    /// Fraction of rows held out for evaluation
    pub test_size: f64,
    /// Seed for the stratified split
    pub split_seed: u64,
    /// Warn when held-out fraud recall is below this
    pub min_recall: Option<f64>,
}

impl TrainingConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let seed = constants::get_seed();
        Self {
            dataset: DatasetSource::from_env(),
            model_path: constants::get_model_path(),
            forest: ForestParams {
                n_trees: constants::get_tree_count(),
                max_depth: constants::get_max_depth(),
                seed,
                ..Default::default()
            },
            test_size: constants::get_test_size(),
            split_seed: seed,
            min_recall: constants::get_min_recall(),
        }
    }
}
