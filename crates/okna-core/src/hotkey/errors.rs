use crate::errors::OknaError;

#[derive(Debug, thiserror::Error)]
pub enum HotkeyError {
    #[error("Invalid hotkey '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Failed to register hotkey '{key}': {message}")]
    RegistrationFailed { key: String, message: String },
}

impl OknaError for HotkeyError {
    fn error_code(&self) -> &'static str {
        match self {
            HotkeyError::InvalidKey { .. } => "HOTKEY_INVALID_KEY",
            HotkeyError::RegistrationFailed { .. } => "HOTKEY_REGISTRATION_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, HotkeyError::InvalidKey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_failed_display() {
        let error = HotkeyError::RegistrationFailed {
            key: "f".to_string(),
            message: "already registered".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to register hotkey 'f': already registered"
        );
        assert_eq!(error.error_code(), "HOTKEY_REGISTRATION_FAILED");
        assert!(!error.is_user_error());
    }
}
