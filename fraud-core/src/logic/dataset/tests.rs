use std::fs;
use std::io::{Cursor, Write};

use tempfile::tempdir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use super::{acquire, extract_csv, load_csv_file, read_csv, DatasetError, DatasetSource};

const SAMPLE: &str = "\
step,type,amount,nameOrig,oldbalanceOrg,newbalanceOrig,nameDest,oldbalanceDest,newbalanceDest,isFraud,isFlaggedFraud
1,PAYMENT,9839.64,C1231006815,170136.0,160296.36,M1979787155,0.0,0.0,0,0
1,TRANSFER,181.0,C1305486145,181.0,0.0,C553264065,0.0,0.0,1,0
2,CASH_OUT,181.0,C840083671,181.0,0.0,C38997010,21182.0,0.0,1,0
3,DEBIT,5337.77,C712410124,41720.0,36382.23,C195600860,41898.0,40348.79,0,0
";

#[test]
fn test_read_csv_shape_and_labels() {
    let dataset = read_csv(SAMPLE.as_bytes()).unwrap();

    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.features.ncols(), 8);
    assert_eq!(dataset.labels, vec![0, 1, 1, 0]);
    assert_eq!(dataset.fraud_count(), 2);
    assert!((dataset.fraud_ratio() - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_read_csv_encodes_and_derives() {
    let dataset = read_csv(SAMPLE.as_bytes()).unwrap();
    let row = dataset.features.row(0);

    // step, type(PAYMENT=2), amount, balances..., actualAmount
    assert_eq!(row[0], 1.0);
    assert_eq!(row[1], 2.0);
    assert_eq!(row[2], 9839.64);
    assert!((row[7] - (170136.0 - 160296.36)).abs() < 1e-9);

    assert_eq!(dataset.features.row(2)[0], 2.0);
    assert_eq!(dataset.features.row(2)[1], 0.0);
    assert_eq!(dataset.features.row(3)[1], 4.0);
}

#[test]
fn test_unknown_category_names_line() {
    let csv = "\
step,type,amount,oldbalanceOrg,newbalanceOrig,oldbalanceDest,newbalanceDest,isFraud
1,PAYMENT,10.0,10.0,0.0,0.0,10.0,0
1,WIRE,10.0,10.0,0.0,0.0,10.0,0
";
    let err = read_csv(csv.as_bytes()).unwrap_err();
    match err {
        DatasetError::UnknownCategory { line, value } => {
            assert_eq!(line, 3);
            assert_eq!(value, "WIRE");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_label_rejected() {
    let csv = "\
step,type,amount,oldbalanceOrg,newbalanceOrig,oldbalanceDest,newbalanceDest,isFraud
1,PAYMENT,10.0,10.0,0.0,0.0,10.0,2
";
    assert!(matches!(
        read_csv(csv.as_bytes()),
        Err(DatasetError::InvalidLabel { line: 2, value: 2 })
    ));
}

#[test]
fn test_empty_dataset_rejected() {
    let csv = "step,type,amount,oldbalanceOrg,newbalanceOrig,oldbalanceDest,newbalanceDest,isFraud\n";
    assert!(matches!(read_csv(csv.as_bytes()), Err(DatasetError::Empty)));
}

#[test]
fn test_acquire_prefers_local_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, SAMPLE).unwrap();

    let source = DatasetSource {
        path: path.clone(),
        url: Some("http://127.0.0.1:9/never-called.csv".to_string()),
    };
    assert_eq!(acquire(&source).unwrap(), path);

    let dataset = load_csv_file(&path).unwrap();
    assert_eq!(dataset.len(), 4);
}

#[test]
fn test_acquire_without_url_fails() {
    let dir = tempdir().unwrap();
    let source = DatasetSource {
        path: dir.path().join("missing.csv"),
        url: None,
    };
    assert!(matches!(acquire(&source), Err(DatasetError::NotAvailable { .. })));
}

#[test]
fn test_non_finite_value_is_rejected() {
    let csv = "\
step,type,amount,nameOrig,oldbalanceOrg,newbalanceOrig,nameDest,oldbalanceDest,newbalanceDest,isFraud,isFlaggedFraud
1,PAYMENT,NaN,C1,10.0,0.0,M1,0.0,0.0,0,0
";
    assert!(matches!(
        read_csv(csv.as_bytes()),
        Err(DatasetError::NonFinite { line: 2, field: "amount" })
    ));
}

fn archive(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, body) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    let mut cursor = writer.finish().unwrap();
    cursor.set_position(0);
    cursor
}

#[test]
fn test_extract_first_csv_from_archive() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("onlinefraud.csv");
    let zipped = archive(&[("README.txt", "not data"), ("onlinefraud.csv", SAMPLE)]);

    extract_csv(zipped, &target).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), SAMPLE);
    assert_eq!(load_csv_file(&target).unwrap().len(), 4);
}

#[test]
fn test_archive_without_csv_fails() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("onlinefraud.csv");

    let result = extract_csv(archive(&[("README.txt", "not data")]), &target);
    assert!(matches!(result, Err(DatasetError::NoCsvInArchive)));
    assert!(!target.exists());
}

#[test]
fn test_garbage_archive_fails() {
    let dir = tempdir().unwrap();
    let result = extract_csv(Cursor::new(b"plain text".to_vec()), &dir.path().join("x.csv"));
    assert!(matches!(result, Err(DatasetError::Archive(_))));
}
