//! JSON file operations over a [`FileSystem`]
//!
//! Provides functions to read and write JSON files with serde validation.

use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Result, StepwiseError};

use super::store::FileSystem;

/// Read and deserialize a JSON file.
///
/// # Arguments
/// * `fs` - File system to read from
/// * `path` - Path to the JSON file
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `Io` - If the file exists but cannot be read
/// * `InvalidJson` - If the contents do not parse into `T`
pub fn read_json<T: DeserializeOwned>(fs: &dyn FileSystem, path: &Path) -> Result<T> {
    let bytes = fs.read_file(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            StepwiseError::FileNotFound(path.display().to_string())
        } else {
            StepwiseError::Io(e)
        }
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        StepwiseError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Serialize a value as pretty JSON (with trailing newline) and write it.
///
/// Atomicity is provided by the file system implementation.
pub fn write_json<T: Serialize>(fs: &dyn FileSystem, path: &Path, data: &T) -> Result<()> {
    let mut content =
        serde_json::to_string_pretty(data).map_err(|e| StepwiseError::InvalidJson(e.to_string()))?;
    content.push('\n');

    fs.write_file(path, content.as_bytes())?;
    Ok(())
}
