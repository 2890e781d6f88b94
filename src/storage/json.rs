//! Whole-file JSON array reading for the source dataset.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::StorageError;

/// Read a file holding one JSON array of records.
///
/// A missing file is reported as [`StorageError::PathNotFound`] so callers
/// can tell "no such match" apart from a corrupt file.
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let records: Vec<T> =
        serde_json::from_reader(reader).map_err(|source| StorageError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}
