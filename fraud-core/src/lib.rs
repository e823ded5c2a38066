//! Fraud Scoring - Core Library
//!
//! Shared by the offline trainer (`fraud-trainer`) and the HTTP scoring
//! service (`fraud-server`).

pub mod constants;
pub mod logic;

pub use logic::features::{FeatureVector, Transaction, TransactionType};
pub use logic::model::{Classifier, ModelArtifact, RandomForest};
pub use logic::scoring::{ScoreResponse, Scorer, ScorerStatus, ScoringError};
pub use logic::training::{train, TrainingConfig, TrainingOutcome};
