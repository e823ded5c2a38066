//! Classifier trait - the seam between scoring and the learned model

use serde::{Deserialize, Serialize};

use super::ModelError;
use crate::logic::features::FeatureVector;

/// Class index of legitimate transactions
pub const CLASS_SAFE: u8 = 0;
/// Class index of fraudulent transactions
pub const CLASS_FRAUD: u8 = 1;

/// Per-class probabilities, each in 0.0 - 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub safe: f64,
    pub fraud: f64,
}

impl ClassProbabilities {
    pub fn from_fraud(fraud: f64) -> Self {
        let fraud = fraud.clamp(0.0, 1.0);
        Self { safe: 1.0 - fraud, fraud }
    }

    /// Argmax class; ties resolve to legitimate
    pub fn predicted_class(&self) -> u8 {
        if self.fraud > self.safe {
            CLASS_FRAUD
        } else {
            CLASS_SAFE
        }
    }

    pub fn max(&self) -> f64 {
        self.safe.max(self.fraud)
    }
}

/// Trait for loaded models the scorer can consult
pub trait Classifier: Send + Sync {
    /// Class probabilities for one feature vector
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, ModelError>;

    /// Human-readable model name for status output
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fraud_is_complementary() {
        let p = ClassProbabilities::from_fraud(0.3);
        assert!((p.safe - 0.7).abs() < 1e-12);
        assert_eq!(p.predicted_class(), CLASS_SAFE);
        assert!((p.max() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_tie_is_safe() {
        assert_eq!(ClassProbabilities::from_fraud(0.5).predicted_class(), CLASS_SAFE);
        assert_eq!(ClassProbabilities::from_fraud(0.51).predicted_class(), CLASS_FRAUD);
    }

    #[test]
    fn test_from_fraud_clamps() {
        assert_eq!(ClassProbabilities::from_fraud(1.5).fraud, 1.0);
        assert_eq!(ClassProbabilities::from_fraud(-0.1).fraud, 0.0);
    }
}
