//! Desktop backend trait definition.

use crate::desktop::errors::DesktopError;
use crate::desktop::types::{WindowHandle, WindowOwner, WindowRect};
use crate::freeze::FreezeError;

/// Raw window-system calls.
///
/// Implementations are thin pass-throughs to the OS. Filtering, liveness
/// re-validation and bookkeeping live in [`WindowDirectory`] and
/// [`FreezeRegistry`], so they behave the same against every backend.
///
/// [`WindowDirectory`]: crate::desktop::WindowDirectory
/// [`FreezeRegistry`]: crate::freeze::FreezeRegistry
pub trait DesktopBackend: Send + Sync {
    /// All top-level windows in OS enumeration order, unfiltered.
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>, DesktopError>;

    /// Whether the handle currently identifies an existing window.
    fn is_window(&self, handle: WindowHandle) -> bool;

    fn is_visible(&self, handle: WindowHandle) -> bool;

    /// Current title; empty when the window has none.
    fn window_text(&self, handle: WindowHandle) -> String;

    fn window_rect(&self, handle: WindowHandle) -> Result<WindowRect, DesktopError>;

    fn set_window_rect(&self, handle: WindowHandle, rect: WindowRect) -> Result<(), DesktopError>;

    /// Thread and process owning the window, or `None` when the OS reports
    /// no owning thread.
    fn window_owner(&self, handle: WindowHandle) -> Option<WindowOwner>;

    /// Suspend a thread, returning its previous suspend count.
    ///
    /// The thread is opened with suspend/resume rights only.
    fn suspend_thread(&self, thread_id: u32) -> Result<u32, FreezeError>;

    /// Resume a thread, returning its previous suspend count.
    ///
    /// The thread is opened with full access rights.
    fn resume_thread(&self, thread_id: u32) -> Result<u32, FreezeError>;
}
