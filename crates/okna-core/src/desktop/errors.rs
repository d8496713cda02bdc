use crate::desktop::types::WindowHandle;
use crate::errors::OknaError;

#[derive(Debug, thiserror::Error)]
pub enum DesktopError {
    #[error("Invalid window handle: {handle} no longer identifies a window")]
    InvalidHandle { handle: WindowHandle },

    #[error("Failed to enumerate windows: {message}")]
    EnumerationFailed { message: String },

    #[error("Failed to access geometry of window {handle}: {message}")]
    GeometryFailed {
        handle: WindowHandle,
        message: String,
    },

    #[error("Window management is not supported on '{platform}'")]
    Unsupported { platform: String },
}

impl OknaError for DesktopError {
    fn error_code(&self) -> &'static str {
        match self {
            DesktopError::InvalidHandle { .. } => "DESKTOP_INVALID_HANDLE",
            DesktopError::EnumerationFailed { .. } => "DESKTOP_ENUMERATION_FAILED",
            DesktopError::GeometryFailed { .. } => "DESKTOP_GEOMETRY_FAILED",
            DesktopError::Unsupported { .. } => "DESKTOP_UNSUPPORTED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            DesktopError::InvalidHandle { .. } | DesktopError::Unsupported { .. }
        )
    }
}
