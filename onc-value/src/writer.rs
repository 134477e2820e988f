use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::tree::Object;

/// Errors that can occur while writing an [`Object`] to disk.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to serialize JSON.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Failed to write output file.
    #[error("failed to write JSON file: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize an [`Object`] into pretty-printed JSON text.
pub fn write(object: &Object) -> Result<String, WriteError> {
    Ok(serde_json::to_string_pretty(object)?)
}

/// Serialize an [`Object`] and write it to `path`.
pub fn write_file(object: &Object, path: &Path) -> Result<(), WriteError> {
    let mut text = write(object)?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}
