//! Freezing windows by suspending the thread that owns them.
//!
//! Windows has no per-window suspension, so "frozen" means the UI thread
//! pumping the window's messages is suspended. The window stops repainting
//! and responding while the process and its other threads keep running.

pub mod errors;
pub mod registry;
pub mod types;

pub use errors::FreezeError;
pub use registry::FreezeRegistry;
pub use types::{FreezeOutcome, UnfreezeAllReport, UnfreezeOutcome};
