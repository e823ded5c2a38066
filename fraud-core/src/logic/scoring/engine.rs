//! Scorer - per-request scoring service
//!
//! Holds the (optional) model for the whole process lifetime. Nothing in
//! here mutates after construction, so one instance is shared across all
//! requests.

use std::path::Path;

use serde_json::Value;

use super::request::parse_transaction;
use super::rules::{check_balances, fallback_is_fraud};
use super::types::{ScoreResponse, ScorerStatus, ScoringMode};
use super::ScoringError;
use crate::logic::features::{FeatureVector, Transaction};
use crate::logic::model::{Classifier, ModelArtifact};

pub struct Scorer {
    classifier: Option<Box<dyn Classifier>>,
}

impl Scorer {
    pub fn new(classifier: Option<Box<dyn Classifier>>) -> Self {
        Self { classifier }
    }

    /// Scorer with a loaded model
    pub fn with_model(classifier: Box<dyn Classifier>) -> Self {
        Self::new(Some(classifier))
    }

    /// Scorer with no model (heuristic mode)
    pub fn heuristic() -> Self {
        Self::new(None)
    }

    /// Load the artifact at `path`; fall back to heuristic mode on failure
    pub fn from_artifact_path(path: &Path) -> Self {
        match ModelArtifact::load(path) {
            Ok(artifact) => {
                log::info!("Model loaded successfully");
                Self::with_model(Box::new(artifact.into_forest()))
            }
            Err(e) => {
                log::warn!("Model not available ({}) - using fallback heuristics", e);
                Self::heuristic()
            }
        }
    }

    pub fn is_model_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn mode(&self) -> ScoringMode {
        if self.is_model_loaded() {
            ScoringMode::Model
        } else {
            ScoringMode::Heuristic
        }
    }

    pub fn status(&self) -> ScorerStatus {
        ScorerStatus {
            model_loaded: self.is_model_loaded(),
            model_name: self
                .classifier
                .as_ref()
                .map(|c| c.name().to_string())
                .unwrap_or_else(|| "None".to_string()),
            scoring_mode: self.mode(),
        }
    }

    /// Validate a raw request body and score it
    pub fn score_json(&self, payload: &Value) -> Result<ScoreResponse, ScoringError> {
        let tx = parse_transaction(payload)?;
        self.score(&tx)
    }

    /// Score a validated transaction
    pub fn score(&self, tx: &Transaction) -> Result<ScoreResponse, ScoringError> {
        let balances = check_balances(tx);
        if !balances.is_consistent() {
            log::debug!(
                "Balance mismatch: amount={}, sender_diff={}, receiver_diff={}",
                tx.amount,
                balances.sender_diff,
                balances.receiver_diff
            );
            return Ok(ScoreResponse::amount_mismatch());
        }

        match &self.classifier {
            Some(classifier) => {
                let features = FeatureVector::for_serving(tx);
                log::debug!("Scoring features: {}", features.to_log_entry());
                let proba = classifier.predict_proba(&features)?;
                let prediction = proba.predicted_class();
                Ok(ScoreResponse::from_model(prediction, proba))
            }
            None => Ok(ScoreResponse::from_heuristic(fallback_is_fraud(tx.amount))),
        }
    }
}
