//! Write-only-if-changed file persistence.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::error::JsonSchemaToClassError;

/// Write `text` to `path` unless the file already holds exactly `text`.
///
/// Missing parent directories are created. Returns `true` when the file was
/// written, `false` when it was left untouched.
///
/// # Errors
///
/// Returns `JsonSchemaToClassError::Io` if reading the existing file (other
/// than it not existing), creating directories, or writing fails.
pub fn write_if_changed(
    path: impl AsRef<Path>,
    text: &str,
) -> Result<bool, JsonSchemaToClassError> {
    let path: &Path = path.as_ref();
    match fs::read(path) {
        Ok(existing) if existing == text.as_bytes() => {
            debug!(path = %path.display(), "unchanged, skipping write");
            return Ok(false);
        }
        Ok(_) => {}
        Err(error) if error.kind() == ErrorKind::NotFound => {}
        Err(error) => return Err(error.into()),
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    info!(path = %path.display(), bytes = text.len(), "wrote file");
    Ok(true)
}
