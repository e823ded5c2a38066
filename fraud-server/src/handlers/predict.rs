//! Prediction handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use fraud_core::ScoreResponse;
use serde_json::Value;

use crate::{AppResult, AppState};

/// POST /predict
///
/// Any JSON body is accepted here; field validation happens in the scorer
/// so missing fields and bad types get their own messages.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ScoreResponse>> {
    let Json(payload) = payload?;
    let response = state.scorer.score_json(&payload)?;

    tracing::debug!(
        is_fraud = response.is_fraud,
        fraud_probability = response.fraud_probability,
        rule_based = response.rule_based_flag,
        "Transaction scored"
    );

    Ok(Json(response))
}
