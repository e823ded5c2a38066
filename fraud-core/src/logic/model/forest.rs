//! Random Forest - bagged decision trees
//!
//! Trees are grown in parallel on rayon's global pool. Each tree gets its
//! own seed drawn from the master seed, so a fit is reproducible no matter
//! how the pool schedules the work.

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::classifier::{ClassProbabilities, Classifier};
use super::tree::{DecisionTree, TrainingView, TreeParams};
use super::ModelError;
use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_SEED, DEFAULT_TREE_COUNT};
use crate::logic::features::FeatureVector;

/// Forest hyper-parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    /// Candidate features per split; `None` means floor(sqrt(n_features))
    pub max_features: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Reweight classes inversely to their frequency
    pub balanced_class_weight: bool,
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_TREE_COUNT,
            max_depth: DEFAULT_MAX_DEPTH,
            max_features: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            balanced_class_weight: true,
            bootstrap: true,
            seed: DEFAULT_SEED,
        }
    }
}

impl ForestParams {
    fn tree_params(&self, n_features: usize) -> TreeParams {
        let sqrt = ((n_features as f64).sqrt().floor() as usize).max(1);
        TreeParams {
            max_depth: self.max_depth,
            max_features: self.max_features.unwrap_or(sqrt).clamp(1, n_features),
            min_samples_split: self.min_samples_split.max(2),
            min_samples_leaf: self.min_samples_leaf.max(1),
        }
    }
}

/// `n / (2 * n_class)` for each class
pub fn balanced_class_weights(labels: &[u8]) -> Result<[f64; 2], ModelError> {
    let mut counts = [0usize; 2];
    for &label in labels {
        match label {
            0 | 1 => counts[label as usize] += 1,
            other => return Err(ModelError::InvalidLabel(other)),
        }
    }

    for (class, &count) in counts.iter().enumerate() {
        if count == 0 {
            return Err(ModelError::MissingClass(class as u8));
        }
    }

    let n = labels.len() as f64;
    Ok([n / (2.0 * counts[0] as f64), n / (2.0 * counts[1] as f64)])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit a forest on `x` (rows × features) and binary labels `y`
    pub fn fit(x: ArrayView2<'_, f64>, y: &[u8], params: &ForestParams) -> Result<Self, ModelError> {
        if y.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        if x.nrows() != y.len() {
            return Err(ModelError::ShapeMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }
        if x.ncols() == 0 {
            return Err(ModelError::InvalidParams("feature matrix has no columns".to_string()));
        }
        if params.n_trees == 0 {
            return Err(ModelError::InvalidParams("n_trees must be positive".to_string()));
        }

        let class_weight = if params.balanced_class_weight {
            balanced_class_weights(y)?
        } else {
            if let Some(&bad) = y.iter().find(|&&l| l > 1) {
                return Err(ModelError::InvalidLabel(bad));
            }
            [1.0, 1.0]
        };
        log::debug!("Class weights: safe={:.4}, fraud={:.4}", class_weight[0], class_weight[1]);

        let n_features = x.ncols();
        let tree_params = params.tree_params(n_features);
        let mut master = StdRng::seed_from_u64(params.seed);
        let seeds: Vec<u64> = (0..params.n_trees).map(|_| master.gen()).collect();

        log::info!(
            "Fitting {} trees (max_depth={}, max_features={}) on {} rows using {} threads",
            params.n_trees,
            tree_params.max_depth,
            tree_params.max_features,
            y.len(),
            rayon::current_num_threads()
        );

        let trees: Vec<DecisionTree> = seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let weights = sample_weights(y, &class_weight, params.bootstrap, &mut rng);
                let rows: Vec<usize> = (0..y.len()).filter(|&i| weights[i] > 0.0).collect();
                let view = TrainingView {
                    x: x.view(),
                    y,
                    weights: &weights,
                };
                DecisionTree::fit(&view, rows, &tree_params, &mut rng)
            })
            .collect();

        let forest = Self { n_features, trees };
        log::info!(
            "Forest fitted: {} trees, {} nodes total, {} leaves, deepest tree {}",
            forest.tree_count(),
            forest.trees.iter().map(DecisionTree::node_count).sum::<usize>(),
            forest.trees.iter().map(DecisionTree::leaf_count).sum::<usize>(),
            forest.trees.iter().map(DecisionTree::depth).max().unwrap_or(0)
        );
        Ok(forest)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Mean of the per-tree leaf fraud shares
    pub fn fraud_probability(&self, x: &[f64]) -> Result<f64, ModelError> {
        if x.len() != self.n_features {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.n_features,
                actual: x.len(),
            });
        }
        if self.trees.is_empty() {
            return Err(ModelError::InvalidParams("forest has no trees".to_string()));
        }

        let sum: f64 = self.trees.iter().map(|t| t.fraud_probability(x)).sum();
        Ok(sum / self.trees.len() as f64)
    }

    /// Probabilities for every row of `x`, evaluated in parallel
    pub fn predict_proba_rows(&self, x: ArrayView2<'_, f64>) -> Result<Vec<ClassProbabilities>, ModelError> {
        (0..x.nrows())
            .into_par_iter()
            .map(|i| {
                let row = x.row(i).to_vec();
                self.fraud_probability(&row).map(ClassProbabilities::from_fraud)
            })
            .collect()
    }

    /// Class predictions for every row of `x`
    pub fn predict_rows(&self, x: ArrayView2<'_, f64>) -> Result<Vec<u8>, ModelError> {
        Ok(self
            .predict_proba_rows(x)?
            .iter()
            .map(ClassProbabilities::predicted_class)
            .collect())
    }

    /// Structural check for forests read back from an artifact
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::InvalidParams("forest has no trees".to_string()));
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|reason| ModelError::MalformedTree { tree: index, reason })?;
        }
        Ok(())
    }
}

fn sample_weights(y: &[u8], class_weight: &[f64; 2], bootstrap: bool, rng: &mut StdRng) -> Vec<f64> {
    let n = y.len();
    let mut weights = if bootstrap {
        let mut counts = vec![0.0; n];
        for _ in 0..n {
            counts[rng.gen_range(0..n)] += 1.0;
        }
        counts
    } else {
        vec![1.0; n]
    };

    for (w, &label) in weights.iter_mut().zip(y) {
        *w *= class_weight[label as usize];
    }
    weights
}

impl Classifier for RandomForest {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, ModelError> {
        features.validate()?;
        let fraud = self.fraud_probability(features.as_slice())?;
        Ok(ClassProbabilities::from_fraud(fraud))
    }

    fn name(&self) -> &str {
        "random_forest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    /// Fraud iff feature 0 > 50, with noise columns
    fn separable(n: usize) -> (Array2<f64>, Vec<u8>) {
        let mut values = Vec::with_capacity(n * 3);
        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let v = (i % 100) as f64;
            values.extend_from_slice(&[v, (i % 7) as f64, (i % 3) as f64]);
            labels.push(u8::from(v > 50.0));
        }
        (Array2::from_shape_vec((n, 3), values).unwrap(), labels)
    }

    fn small_params() -> ForestParams {
        ForestParams {
            n_trees: 15,
            max_depth: 6,
            max_features: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn test_balanced_class_weights() {
        let labels = [0, 0, 0, 1];
        let w = balanced_class_weights(&labels).unwrap();
        assert!((w[0] - 4.0 / 6.0).abs() < 1e-12);
        assert!((w[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_balanced_weights_need_both_classes() {
        assert!(matches!(balanced_class_weights(&[0, 0]), Err(ModelError::MissingClass(1))));
        assert!(matches!(balanced_class_weights(&[0, 2]), Err(ModelError::InvalidLabel(2))));
    }

    #[test]
    fn test_fit_learns_threshold() {
        let (x, y) = separable(400);
        let forest = RandomForest::fit(x.view(), &y, &small_params()).unwrap();

        assert_eq!(forest.tree_count(), 15);
        assert!(forest.fraud_probability(&[90.0, 1.0, 1.0]).unwrap() > 0.9);
        assert!(forest.fraud_probability(&[10.0, 1.0, 1.0]).unwrap() < 0.1);
        assert!(forest.validate().is_ok());
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (x, y) = separable(200);
        let a = RandomForest::fit(x.view(), &y, &small_params()).unwrap();
        let b = RandomForest::fit(x.view(), &y, &small_params()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_predict_rows() {
        let (x, y) = separable(300);
        let forest = RandomForest::fit(x.view(), &y, &small_params()).unwrap();
        let predictions = forest.predict_rows(x.view()).unwrap();
        let correct = predictions.iter().zip(&y).filter(|(p, t)| p == t).count();
        assert!(correct as f64 / y.len() as f64 > 0.95);
    }

    #[test]
    fn test_feature_count_checked() {
        let (x, y) = separable(100);
        let forest = RandomForest::fit(x.view(), &y, &small_params()).unwrap();
        assert!(matches!(
            forest.fraud_probability(&[1.0]),
            Err(ModelError::FeatureCountMismatch { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let (x, _) = separable(10);
        assert!(matches!(
            RandomForest::fit(x.view(), &[0, 1], &small_params()),
            Err(ModelError::ShapeMismatch { rows: 10, labels: 2 })
        ));

        let zero_trees = ForestParams { n_trees: 0, ..small_params() };
        let (x, y) = separable(10);
        assert!(RandomForest::fit(x.view(), &y, &zero_trees).is_err());
    }

    #[test]
    fn test_default_params() {
        let params = ForestParams::default();
        assert_eq!(params.n_trees, 100);
        assert_eq!(params.max_depth, 10);
        assert!(params.balanced_class_weight);
        assert_eq!(params.tree_params(8).max_features, 2);
    }
}
