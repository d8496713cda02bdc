//! Window enumeration, liveness checks and placement.
//!
//! - [`DesktopBackend`] - Raw OS calls, implemented by [`Win32Desktop`] on Windows
//! - [`WindowDirectory`] - Filtering and handle re-validation on top of a backend
//! - [`test_helpers::FakeDesktop`] - In-memory backend for tests

pub mod directory;
pub mod errors;
pub mod traits;
pub mod types;

#[cfg(windows)]
pub mod win32;

#[doc(hidden)]
pub mod test_helpers;

use std::sync::Arc;

pub use directory::WindowDirectory;
pub use errors::DesktopError;
pub use traits::DesktopBackend;
pub use types::{WindowHandle, WindowOwner, WindowRecord, WindowRect};

#[cfg(windows)]
pub use win32::Win32Desktop;

/// The backend for the platform this binary was built for.
#[cfg(windows)]
pub fn native_backend() -> Result<Arc<dyn DesktopBackend>, DesktopError> {
    Ok(Arc::new(Win32Desktop::new()))
}

/// The backend for the platform this binary was built for.
#[cfg(not(windows))]
pub fn native_backend() -> Result<Arc<dyn DesktopBackend>, DesktopError> {
    Err(DesktopError::Unsupported {
        platform: std::env::consts::OS.to_string(),
    })
}
