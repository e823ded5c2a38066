use serde_json::json;

use super::{FeatureVector, TransactionType, FEATURE_COUNT};
use crate::logic::dataset::read_csv;
use crate::logic::scoring::parse_transaction;

const ROW: &str = "\
step,type,amount,nameOrig,oldbalanceOrg,newbalanceOrig,nameDest,oldbalanceDest,newbalanceDest,isFraud,isFlaggedFraud
1,CASH_OUT,229133.94,C905080434,15325.0,0.0,C476402209,5083.0,51513.44,0,0
";

#[test]
fn test_training_and_serving_build_identical_vectors() {
    let dataset = read_csv(ROW.as_bytes()).unwrap();
    let trained: Vec<f64> = dataset.features.row(0).to_vec();

    let request = json!({
        "type": "CASH_OUT",
        "amount": 229133.94,
        "oldbalanceOrg": 15325.0,
        "newbalanceOrig": 0.0,
        "oldbalanceDest": 5083.0,
        "newbalanceDest": 51513.44,
    });
    let served = FeatureVector::for_serving(&parse_transaction(&request).unwrap());

    assert_eq!(trained.len(), FEATURE_COUNT);
    assert_eq!(trained.as_slice(), served.as_slice());
}

#[test]
fn test_serving_accepts_strings_and_lowercase() {
    let as_numbers = json!({
        "type": "TRANSFER",
        "amount": 181.0,
        "oldbalanceOrg": 181.0,
        "newbalanceOrig": 0.0,
        "oldbalanceDest": 0.0,
        "newbalanceDest": 181.0,
    });
    let as_strings = json!({
        "type": "transfer",
        "amount": "181",
        "oldbalanceOrg": "181.0",
        "newbalanceOrig": "0",
        "oldbalanceDest": "0",
        "newbalanceDest": "181",
    });

    let a = FeatureVector::for_serving(&parse_transaction(&as_numbers).unwrap());
    let b = FeatureVector::for_serving(&parse_transaction(&as_strings).unwrap());
    assert_eq!(a, b);
    assert_eq!(a.values[1], f64::from(TransactionType::Transfer.code()));
}

#[test]
fn test_encoding_is_shared() {
    for tx_type in TransactionType::ALL {
        let csv = format!(
            "step,type,amount,nameOrig,oldbalanceOrg,newbalanceOrig,nameDest,oldbalanceDest,newbalanceDest,isFraud,isFlaggedFraud\n\
             1,{},10.0,C1,10.0,0.0,C2,0.0,10.0,0,0\n",
            tx_type.label()
        );
        let dataset = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(dataset.features.row(0)[1], f64::from(tx_type.code()));
    }
}
