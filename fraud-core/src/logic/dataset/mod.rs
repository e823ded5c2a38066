//! Dataset Module - Labeled training data
//!
//! Acquires the historical transaction CSV, drops the identifier columns,
//! encodes the category and derives `actualAmount` through the shared
//! feature contract.

pub mod record;
pub mod loader;
pub mod download;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use ndarray::Array2;
use thiserror::Error;

pub use download::{acquire, extract_csv, DatasetSource};
pub use loader::{load_csv_file, read_csv};
pub use record::DatasetRecord;

/// Dataset errors
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset not found at {path} and DATASET_URL is not set")]
    NotAvailable { path: PathBuf },

    #[error("failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("dataset archive error: {0}")]
    Archive(String),

    #[error("dataset archive contains no .csv file")]
    NoCsvInArchive,

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: unknown transaction type {value:?}")]
    UnknownCategory { line: usize, value: String },

    #[error("line {line}: isFraud must be 0 or 1, got {value}")]
    InvalidLabel { line: usize, value: u8 },

    #[error("line {line}: non-finite value in {field}")]
    NonFinite { line: usize, field: &'static str },

    #[error("dataset contains no rows")]
    Empty,

    #[error("feature matrix shape error: {0}")]
    Shape(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Preprocessed table: one feature row per label
#[derive(Debug, Clone)]
pub struct Dataset {
    /// rows × FEATURE_COUNT, ordered by the feature layout
    pub features: Array2<f64>,
    /// `isFraud` column (0 = legitimate, 1 = fraud)
    pub labels: Vec<u8>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn fraud_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == 1).count()
    }

    pub fn fraud_ratio(&self) -> f64 {
        if self.labels.is_empty() {
            0.0
        } else {
            self.fraud_count() as f64 / self.labels.len() as f64
        }
    }
}
