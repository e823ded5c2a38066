use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};

use super::DatasetError;

/// Leading bytes of a zip local file header
const ZIP_MAGIC: [u8; 4] = *b"PK\x03\x04";

/// Where the trainer gets its labeled CSV from
#[derive(Debug, Clone)]
pub struct DatasetSource {
    /// Local CSV; also the cache target for downloads
    pub path: PathBuf,
    /// Remote CSV or zip archive fetched when `path` does not exist
    pub url: Option<String>,
}

impl DatasetSource {
    pub fn from_env() -> Self {
        Self {
            path: crate::constants::get_dataset_path(),
            url: crate::constants::get_dataset_url(),
        }
    }
}

/// Make the dataset available locally and return its path
///
/// A file already at `source.path` is reused as-is; otherwise it is
/// downloaded once from `source.url`. Zip archives are unpacked and their
/// first `.csv` entry becomes the cached dataset.
pub fn acquire(source: &DatasetSource) -> Result<PathBuf, DatasetError> {
    if source.path.is_file() {
        log::info!("Using dataset at {}", source.path.display());
        return Ok(source.path.clone());
    }

    let url = source.url.as_deref().ok_or_else(|| DatasetError::NotAvailable {
        path: source.path.clone(),
    })?;

    log::info!("Downloading dataset from {}", url);
    download(url, &source.path)?;
    log::info!("Dataset downloaded to: {}", source.path.display());

    Ok(source.path.clone())
}

fn download(url: &str, target: &Path) -> Result<(), DatasetError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    let response = ureq::get(url)
        .call()
        .map_err(|e| DatasetError::Download {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    // Written under a temporary name so an interrupted download is never reused
    let partial = target.with_extension("part");
    let mut writer = BufWriter::new(File::create(&partial)?);
    let bytes = io::copy(&mut response.into_reader(), &mut writer)?;
    writer.flush()?;
    drop(writer);
    log::debug!("Downloaded {} bytes", bytes);

    if is_zip(&partial)? {
        let result = extract_csv(BufReader::new(File::open(&partial)?), target);
        fs::remove_file(&partial)?;
        result
    } else {
        fs::rename(&partial, target)?;
        Ok(())
    }
}

fn is_zip(path: &Path) -> Result<bool, DatasetError> {
    let mut magic = [0u8; 4];
    let mut file = File::open(path)?;
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(magic == ZIP_MAGIC),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Unpack the first `.csv` entry of a zip archive to `target`
pub fn extract_csv<R: Read + Seek>(archive: R, target: &Path) -> Result<(), DatasetError> {
    let mut archive = zip::ZipArchive::new(archive).map_err(|e| DatasetError::Archive(e.to_string()))?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| DatasetError::Archive(e.to_string()))?;
        if !entry.is_file() || !entry.name().to_ascii_lowercase().ends_with(".csv") {
            continue;
        }
        log::info!("Extracting {} from archive", entry.name());

        let partial = target.with_extension("extract");
        let mut writer = BufWriter::new(File::create(&partial)?);
        io::copy(&mut entry, &mut writer)?;
        writer.flush()?;
        drop(writer);

        fs::rename(&partial, target)?;
        return Ok(());
    }

    Err(DatasetError::NoCsvInArchive)
}
