use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ndarray::Array2;

use super::record::DatasetRecord;
use super::{Dataset, DatasetError};
use crate::logic::features::{FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT};

/// Load and preprocess the labeled CSV at `path`
pub fn load_csv_file(path: &Path) -> Result<Dataset, DatasetError> {
    log::info!("Loading and preprocessing data from {}", path.display());
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(BufReader::new(file))
}

/// Parse labeled rows into a feature matrix and label vector
///
/// Every row is encoded through [`FeatureVector::from_transaction`], the
/// same builder the scorer uses.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut values: Vec<f64> = Vec::new();
    let mut labels: Vec<u8> = Vec::new();

    for (index, result) in csv_reader.deserialize::<DatasetRecord>().enumerate() {
        // Header is line 1
        let line = index + 2;
        let record = result?;

        let tx = record
            .to_transaction()
            .map_err(|_| DatasetError::UnknownCategory {
                line,
                value: record.tx_type.clone(),
            })?;

        if record.is_fraud > 1 {
            return Err(DatasetError::InvalidLabel {
                line,
                value: record.is_fraud,
            });
        }

        let vector = FeatureVector::from_transaction(&tx, record.step);
        if let Some(i) = vector.values.iter().position(|v| !v.is_finite()) {
            return Err(DatasetError::NonFinite {
                line,
                field: FEATURE_LAYOUT[i],
            });
        }

        values.extend_from_slice(vector.as_slice());
        labels.push(record.is_fraud);
    }

    if labels.is_empty() {
        return Err(DatasetError::Empty);
    }

    let rows = labels.len();
    let features = Array2::from_shape_vec((rows, FEATURE_COUNT), values)
        .map_err(|e| DatasetError::Shape(e.to_string()))?;

    let dataset = Dataset { features, labels };
    log::info!(
        "Loaded {} rows ({} fraud, {:.4}% fraud ratio)",
        dataset.len(),
        dataset.fraud_count(),
        dataset.fraud_ratio() * 100.0
    );
    Ok(dataset)
}
