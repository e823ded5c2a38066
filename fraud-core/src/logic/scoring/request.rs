//! Request parsing - JSON object → validated Transaction
//!
//! Check order: object shape, required fields present, transaction type,
//! numeric values. The type is checked before any number so an unknown
//! category is reported even when the amounts are also bad.

use serde_json::{Map, Value};

use super::ScoringError;
use crate::logic::features::{Transaction, TransactionType};

/// Required request fields, in the order they are checked
pub const REQUIRED_FIELDS: [&str; 6] = [
    "type",
    "amount",
    "oldbalanceOrg",
    "newbalanceOrig",
    "oldbalanceDest",
    "newbalanceDest",
];

/// Validate a request body and build the transaction it describes
pub fn parse_transaction(payload: &Value) -> Result<Transaction, ScoringError> {
    let object = payload.as_object().ok_or(ScoringError::NotAnObject)?;

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !object.contains_key(**f)) {
        return Err(ScoringError::MissingField(missing.to_string()));
    }

    let tx_type = match &object["type"] {
        Value::String(label) => TransactionType::from_label(label)
            .map_err(|_| ScoringError::InvalidType(label.clone()))?,
        other => return Err(ScoringError::InvalidType(other.to_string())),
    };

    let amount = number(object, "amount")?;
    if amount < 0.0 {
        return Err(ScoringError::InvalidNumber {
            field: "amount".to_string(),
            value: amount.to_string(),
        });
    }

    Ok(Transaction {
        tx_type,
        amount,
        old_balance_org: number(object, "oldbalanceOrg")?,
        new_balance_orig: number(object, "newbalanceOrig")?,
        old_balance_dest: number(object, "oldbalanceDest")?,
        new_balance_dest: number(object, "newbalanceDest")?,
    })
}

/// Accepts JSON numbers and numeric strings; rejects non-finite values
fn number(object: &Map<String, Value>, field: &str) -> Result<f64, ScoringError> {
    let value = &object[field];
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScoringError::InvalidNumber {
            field: field.to_string(),
            value: match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        })
}
