//! Names file persistence
//!
//! The file is a flat JSON object of decimal handle strings to names:
//!
//! ```json
//! {
//!   "133902": "editor",
//!   "65874": "music"
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::errors::NameStoreError;

/// Raw on-disk shape, keys still unvalidated.
pub type RawNames = BTreeMap<String, String>;

/// Read the names file.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_names_file(path: &Path) -> Result<Option<RawNames>, NameStoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(NameStoreError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            });
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| NameStoreError::LoadCorrupted {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        tracing::warn!(
            event = "core.names.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
            message = "Failed to clean up temp file after operation error"
        );
    }
}

/// Overwrite the names file with `names`.
///
/// Writes a sibling temp file and renames it into place so a reader never
/// sees a half-written file.
pub fn write_names_file(path: &Path, names: &RawNames) -> Result<(), NameStoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| NameStoreError::SaveFailed {
            message: format!("Failed to create directory ({}): {}", parent.display(), e),
        })?;
    }

    let json = serde_json::to_string_pretty(names).map_err(|e| NameStoreError::SaveFailed {
        message: format!("Failed to serialize names: {}", e),
    })?;

    let temp_file = path.with_extension("json.tmp");

    if let Err(e) = fs::write(&temp_file, json) {
        cleanup_temp_file(&temp_file, &e);
        return Err(NameStoreError::SaveFailed {
            message: format!("Failed to write {}: {}", temp_file.display(), e),
        });
    }

    if let Err(e) = fs::rename(&temp_file, path) {
        cleanup_temp_file(&temp_file, &e);
        return Err(NameStoreError::SaveFailed {
            message: format!("Failed to replace {}: {}", path.display(), e),
        });
    }

    tracing::info!(
        event = "core.names.saved",
        path = %path.display(),
        count = names.len()
    );

    Ok(())
}
