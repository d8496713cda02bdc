use std::path::PathBuf;

use crate::desktop::WindowHandle;
use crate::errors::OknaError;

#[derive(Debug, thiserror::Error)]
pub enum NameStoreError {
    #[error("Invalid window handle: {handle} no longer identifies a window")]
    InvalidHandle { handle: WindowHandle },

    #[error("Failed to read names file '{path}': {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Names file '{path}' is corrupted: {message}")]
    LoadCorrupted { path: PathBuf, message: String },

    #[error("Failed to save window names: {message}")]
    SaveFailed { message: String },
}

impl OknaError for NameStoreError {
    fn error_code(&self) -> &'static str {
        match self {
            NameStoreError::InvalidHandle { .. } => "NAMES_INVALID_HANDLE",
            NameStoreError::LoadFailed { .. } => "NAMES_LOAD_FAILED",
            NameStoreError::LoadCorrupted { .. } => "NAMES_LOAD_CORRUPTED",
            NameStoreError::SaveFailed { .. } => "NAMES_SAVE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, NameStoreError::InvalidHandle { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_failed_display() {
        let error = NameStoreError::SaveFailed {
            message: "disk full".to_string(),
        };
        assert_eq!(error.to_string(), "Failed to save window names: disk full");
        assert_eq!(error.error_code(), "NAMES_SAVE_FAILED");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_invalid_handle_is_user_error() {
        let error = NameStoreError::InvalidHandle {
            handle: WindowHandle::from_raw(5),
        };
        assert!(error.is_user_error());
    }
}
