//! Training Module - offline model fitting
//!
//! Stratified split → balanced random forest → held-out report →
//! artifact. Evaluation is diagnostic only; the artifact is produced
//! whatever the scores are.

pub mod config;
pub mod split;
pub mod metrics;

use ndarray::Axis;
use thiserror::Error;

use crate::logic::dataset::Dataset;
use crate::logic::model::{ModelArtifact, ModelError, RandomForest};

pub use config::TrainingConfig;
pub use metrics::{ClassMetrics, ClassificationReport, ConfusionMatrix};
pub use split::{stratified_split, SplitIndices};

/// Training errors
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("test size must be within (0, 1), got {0}")]
    InvalidTestSize(f64),

    #[error("{rows} rows cannot be split with test size {test_size}")]
    PartitionTooSmall { rows: usize, test_size: f64 },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Fitted artifact plus its held-out evaluation
#[derive(Debug)]
pub struct TrainingOutcome {
    pub artifact: ModelArtifact,
    pub report: ClassificationReport,
    pub train_rows: usize,
    pub test_rows: usize,
}

impl TrainingOutcome {
    /// True when a recall floor is configured and the model misses it
    pub fn below_recall_floor(&self, min_recall: Option<f64>) -> bool {
        min_recall.map_or(false, |floor| self.report.fraud.recall < floor)
    }
}

/// Split, fit, evaluate and wrap the model in an artifact
pub fn train(dataset: &Dataset, config: &TrainingConfig) -> Result<TrainingOutcome, TrainingError> {
    log::info!("Training model...");

    let split = stratified_split(&dataset.labels, config.test_size, config.split_seed)?;
    log::info!("Train rows: {}, test rows: {}", split.train.len(), split.test.len());

    let x_train = dataset.features.select(Axis(0), &split.train);
    let y_train: Vec<u8> = split.train.iter().map(|&i| dataset.labels[i]).collect();
    let x_test = dataset.features.select(Axis(0), &split.test);
    let y_test: Vec<u8> = split.test.iter().map(|&i| dataset.labels[i]).collect();

    let forest = RandomForest::fit(x_train.view(), &y_train, &config.forest)?;

    log::info!("Evaluating on held-out partition...");
    let y_pred = forest.predict_rows(x_test.view())?;
    let report = ClassificationReport::from_predictions(&y_test, &y_pred);

    let fraud_ratio = y_train.iter().filter(|&&l| l == 1).count() as f64 / y_train.len() as f64;
    let artifact = ModelArtifact::new(forest, config.forest, y_train.len(), fraud_ratio)?;

    let outcome = TrainingOutcome {
        artifact,
        report,
        train_rows: split.train.len(),
        test_rows: split.test.len(),
    };

    if outcome.below_recall_floor(config.min_recall) {
        log::warn!(
            "Fraud recall {:.4} is below the configured minimum {:.4}; saving anyway",
            outcome.report.fraud.recall,
            config.min_recall.unwrap_or_default()
        );
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::dataset::{read_csv, DatasetSource};
    use crate::logic::model::{Classifier, ForestParams};
    use crate::logic::features::{FeatureVector, Transaction, TransactionType};
    use std::fmt::Write;
    use std::path::PathBuf;

    /// Synthetic data: large drained TRANSFERs are fraud
    fn synthetic_csv() -> String {
        let mut csv = String::from(
            "step,type,amount,nameOrig,oldbalanceOrg,newbalanceOrig,nameDest,oldbalanceDest,newbalanceDest,isFraud,isFlaggedFraud\n",
        );
        for i in 0..600 {
            let fraud = i % 10 == 0;
            let (tx_type, amount) = if fraud {
                ("TRANSFER", 200_000.0 + i as f64 * 10.0)
            } else {
                (["PAYMENT", "CASH_IN", "DEBIT", "CASH_OUT"][i % 4], 100.0 + (i % 50) as f64 * 20.0)
            };
            let old_org = if fraud { amount } else { amount + 5_000.0 };
            writeln!(
                csv,
                "{},{},{},C{},{},{},C{},{},{},{},0",
                1 + i % 30,
                tx_type,
                amount,
                i,
                old_org,
                old_org - amount,
                i + 1,
                0.0,
                amount,
                u8::from(fraud)
            )
            .unwrap();
        }
        csv
    }

    fn config() -> TrainingConfig {
        TrainingConfig {
            dataset: DatasetSource { path: PathBuf::from("unused.csv"), url: None },
            model_path: PathBuf::from("unused.json"),
            forest: ForestParams { n_trees: 10, max_depth: 5, ..Default::default() },
            test_size: 0.2,
            split_seed: 42,
            min_recall: Some(0.5),
        }
    }

    #[test]
    fn test_train_end_to_end() {
        let dataset = read_csv(synthetic_csv().as_bytes()).unwrap();
        let outcome = train(&dataset, &config()).unwrap();

        assert_eq!(outcome.train_rows + outcome.test_rows, 600);
        assert_eq!(outcome.test_rows, 120);
        assert_eq!(outcome.report.fraud.support, 12);
        assert!(outcome.report.fraud.recall > 0.9);
        assert!(!outcome.below_recall_floor(config().min_recall));
        assert!(outcome.artifact.verify().is_ok());
        assert_eq!(outcome.artifact.metadata.training_samples, 480);
    }

    #[test]
    fn test_trained_model_scores_serving_vectors() {
        let dataset = read_csv(synthetic_csv().as_bytes()).unwrap();
        let forest = train(&dataset, &config()).unwrap().artifact.into_forest();

        let drained = Transaction {
            tx_type: TransactionType::Transfer,
            amount: 250_000.0,
            old_balance_org: 250_000.0,
            new_balance_orig: 0.0,
            old_balance_dest: 0.0,
            new_balance_dest: 250_000.0,
        };
        let proba = forest.predict_proba(&FeatureVector::for_serving(&drained)).unwrap();
        assert!(proba.fraud > 0.5);
    }

    #[test]
    fn test_recall_floor() {
        let dataset = read_csv(synthetic_csv().as_bytes()).unwrap();
        let outcome = train(&dataset, &config()).unwrap();
        assert!(outcome.below_recall_floor(Some(1.1)));
        assert!(!outcome.below_recall_floor(None));
    }
}
