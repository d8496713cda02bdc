use crate::desktop::WindowHandle;
use crate::errors::OknaError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FreezeError {
    #[error("Invalid window handle: {handle} no longer identifies a window")]
    InvalidHandle { handle: WindowHandle },

    #[error("Error getting window thread ID for window {handle}")]
    LookupFailed { handle: WindowHandle },

    #[error("Error opening window thread {thread_id}: {message}")]
    OpenFailed { thread_id: u32, message: String },

    #[error("Failed to suspend thread {thread_id}: {message}")]
    SuspendFailed { thread_id: u32, message: String },

    #[error("Failed to resume thread {thread_id}: {message}")]
    ResumeFailed { thread_id: u32, message: String },
}

impl OknaError for FreezeError {
    fn error_code(&self) -> &'static str {
        match self {
            FreezeError::InvalidHandle { .. } => "FREEZE_INVALID_HANDLE",
            FreezeError::LookupFailed { .. } => "FREEZE_LOOKUP_FAILED",
            FreezeError::OpenFailed { .. } => "FREEZE_OPEN_FAILED",
            FreezeError::SuspendFailed { .. } => "FREEZE_SUSPEND_FAILED",
            FreezeError::ResumeFailed { .. } => "FREEZE_RESUME_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        // Exhaustive match ensures new variants force an explicit classification.
        match self {
            FreezeError::InvalidHandle { .. } | FreezeError::OpenFailed { .. } => true,

            FreezeError::LookupFailed { .. }
            | FreezeError::SuspendFailed { .. }
            | FreezeError::ResumeFailed { .. } => false,
        }
    }
}
