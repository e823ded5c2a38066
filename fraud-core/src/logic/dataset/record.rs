use serde::{Deserialize, Serialize};

use crate::logic::features::{FeatureError, Transaction, TransactionType};

/// One row of the labeled transaction CSV
///
/// `nameOrig`, `nameDest` and `isFlaggedFraud` are present in the source
/// file but are not features; serde skips them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatasetRecord {
    pub step: u32,

    #[serde(rename = "type")]
    pub tx_type: String,

    pub amount: f64,

    #[serde(rename = "oldbalanceOrg")]
    pub old_balance_org: f64,
    #[serde(rename = "newbalanceOrig")]
    pub new_balance_orig: f64,

    #[serde(rename = "oldbalanceDest")]
    pub old_balance_dest: f64,
    #[serde(rename = "newbalanceDest")]
    pub new_balance_dest: f64,

    #[serde(rename = "isFraud")]
    pub is_fraud: u8,
}

impl DatasetRecord {
    /// Convert to the shared transaction type, encoding the category
    pub fn to_transaction(&self) -> Result<Transaction, FeatureError> {
        Ok(Transaction {
            tx_type: TransactionType::from_label(&self.tx_type)?,
            amount: self.amount,
            old_balance_org: self.old_balance_org,
            new_balance_orig: self.new_balance_orig,
            old_balance_dest: self.old_balance_dest,
            new_balance_dest: self.new_balance_dest,
        })
    }
}
