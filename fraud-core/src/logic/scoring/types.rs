//! Scoring Types

use serde::{Deserialize, Serialize};

use super::rules::{
    AMOUNT_MISMATCH_REASON, FALLBACK_FRAUD_PROBABILITY, FALLBACK_SAFE_FRAUD_PROBABILITY,
};
use crate::logic::model::{ClassProbabilities, CLASS_FRAUD, CLASS_SAFE};

/// How consistent transactions are scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// A trained model is loaded
    Model,
    /// No model; static amount heuristic
    Heuristic,
}

/// Result returned for one scored transaction
///
/// Probabilities and confidence are percentages (0 - 100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub prediction: u8,
    pub is_fraud: bool,
    pub fraud_probability: f64,
    pub safe_probability: f64,
    pub confidence: f64,
    /// The decision bypassed the learned model
    pub rule_based_flag: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_verified: Option<bool>,
}

impl ScoreResponse {
    /// Balances do not add up: flagged without consulting the model
    pub fn amount_mismatch() -> Self {
        Self {
            prediction: CLASS_FRAUD,
            is_fraud: true,
            fraud_probability: 100.0,
            safe_probability: 0.0,
            confidence: 100.0,
            rule_based_flag: true,
            reason: Some(AMOUNT_MISMATCH_REASON.to_string()),
            amount_verified: None,
        }
    }

    /// Model verdict on a verified transaction
    pub fn from_model(prediction: u8, proba: ClassProbabilities) -> Self {
        Self {
            prediction,
            is_fraud: prediction == CLASS_FRAUD,
            fraud_probability: proba.fraud * 100.0,
            safe_probability: proba.safe * 100.0,
            confidence: proba.max() * 100.0,
            rule_based_flag: false,
            reason: None,
            amount_verified: Some(true),
        }
    }

    /// Heuristic verdict on a verified transaction
    pub fn from_heuristic(is_fraud: bool) -> Self {
        let fraud_probability = if is_fraud {
            FALLBACK_FRAUD_PROBABILITY
        } else {
            FALLBACK_SAFE_FRAUD_PROBABILITY
        };
        let safe_probability = 100.0 - fraud_probability;

        Self {
            prediction: if is_fraud { CLASS_FRAUD } else { CLASS_SAFE },
            is_fraud,
            fraud_probability,
            safe_probability,
            confidence: fraud_probability.max(safe_probability),
            rule_based_flag: true,
            reason: None,
            amount_verified: Some(true),
        }
    }
}

/// Scorer status for health output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorerStatus {
    pub model_loaded: bool,
    pub model_name: String,
    pub scoring_mode: ScoringMode,
}
