//! okna-core: Core library for naming, placing and freezing desktop windows
//!
//! The CLI is a thin interactive shell over this crate.
//!
//! # Main Entry Points
//!
//! - [`desktop`] - Enumerate, resolve and move top-level windows
//! - [`names`] - Persistent user-chosen window names
//! - [`freeze`] - Suspend and resume the threads that own windows
//! - [`hotkey`] - Global unfreeze-all hotkey
//! - [`config`] - Configuration management

pub mod config;
pub mod desktop;
pub mod errors;
pub mod events;
pub mod freeze;
pub mod hotkey;
pub mod input;
pub mod logging;
pub mod names;

// Re-export commonly used types at crate root for convenience
pub use config::OknaConfig;
pub use desktop::{
    DesktopBackend, DesktopError, WindowDirectory, WindowHandle, WindowRecord, WindowRect,
};
pub use errors::{OknaError, OknaResult};
pub use freeze::{FreezeError, FreezeOutcome, FreezeRegistry, UnfreezeAllReport, UnfreezeOutcome};
pub use hotkey::{HotkeyError, HotkeyListener};
pub use input::ParseError;
pub use names::{NameStore, NameStoreError};

// Re-export logging initialization
pub use logging::init_logging;
