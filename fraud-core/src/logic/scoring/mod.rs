//! Scoring Module
//!
//! Decides Fraud/Legitimate for one transaction.
//!
//! ## Structure
//! - `request`: JSON validation into a [`Transaction`](crate::logic::features::Transaction)
//! - `rules`: balance-consistency check and heuristic constants
//! - `types`: response and status types
//! - `engine`: the [`Scorer`] service object
//!
//! ## Order of decisions
//! 1. Balances inconsistent → fraud, rule-based, model never consulted
//! 2. Model loaded → model probabilities
//! 3. No model → amount heuristic, rule-based

pub mod request;
pub mod rules;
pub mod types;
pub mod engine;

use thiserror::Error;

use crate::logic::model::ModelError;

pub use engine::Scorer;
pub use request::{parse_transaction, REQUIRED_FIELDS};
pub use rules::{check_balances, BalanceCheck, BALANCE_TOLERANCE};
pub use types::{ScoreResponse, ScorerStatus, ScoringMode};

/// Scoring errors
///
/// Everything except [`ScoringError::Model`] is a caller mistake.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Request must be a JSON object")]
    NotAnObject,

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid transaction type: {0}")]
    InvalidType(String),

    #[error("Invalid input value for {field}: {value}")]
    InvalidNumber { field: String, value: String },

    #[error("model inference failed: {0}")]
    Model(#[from] ModelError),
}

impl ScoringError {
    /// True for errors caused by the request itself
    pub fn is_validation(&self) -> bool {
        !matches!(self, ScoringError::Model(_))
    }
}
