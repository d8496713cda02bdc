use std::sync::Arc;

use tracing::{debug, info, warn};

use super::errors::DesktopError;
use super::traits::DesktopBackend;
use super::types::{WindowHandle, WindowRecord, WindowRect};

/// Stateless view over the OS window list.
///
/// Every call goes straight to the backend; nothing is cached, so records
/// are only as fresh as the call that produced them.
#[derive(Clone)]
pub struct WindowDirectory {
    backend: Arc<dyn DesktopBackend>,
}

impl WindowDirectory {
    pub fn new(backend: Arc<dyn DesktopBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn DesktopBackend> {
        &self.backend
    }

    /// List visible top-level windows that carry a non-empty title, in OS
    /// enumeration order.
    pub fn enumerate(&self) -> Result<Vec<WindowRecord>, DesktopError> {
        let handles = self.backend.top_level_windows()?;
        let total = handles.len();

        let records: Vec<WindowRecord> = handles
            .into_iter()
            .filter(|&handle| self.backend.is_visible(handle))
            .filter_map(|handle| {
                let title = self.backend.window_text(handle);
                if title.is_empty() {
                    None
                } else {
                    Some(WindowRecord::new(title, handle))
                }
            })
            .collect();

        debug!(
            event = "core.desktop.enumerate_completed",
            total = total,
            returned_count = records.len()
        );
        Ok(records)
    }

    /// Current title of a live window, or `None` if the handle is stale.
    pub fn resolve(&self, handle: WindowHandle) -> Option<WindowRecord> {
        if !self.backend.is_window(handle) {
            return None;
        }
        Some(WindowRecord::new(self.backend.window_text(handle), handle))
    }

    pub fn is_live(&self, handle: WindowHandle) -> bool {
        self.backend.is_window(handle)
    }

    fn ensure_live(&self, handle: WindowHandle) -> Result<(), DesktopError> {
        if self.is_live(handle) {
            Ok(())
        } else {
            warn!(event = "core.desktop.handle_stale", handle = %handle);
            Err(DesktopError::InvalidHandle { handle })
        }
    }

    /// Position and size of a live window.
    pub fn position(&self, handle: WindowHandle) -> Result<WindowRect, DesktopError> {
        self.ensure_live(handle)?;
        self.backend.window_rect(handle)
    }

    /// Move a window, keeping its current width/height where not given.
    ///
    /// Returns the rect that was applied.
    pub fn move_window(
        &self,
        handle: WindowHandle,
        x: i32,
        y: i32,
        width: Option<i32>,
        height: Option<i32>,
    ) -> Result<WindowRect, DesktopError> {
        self.ensure_live(handle)?;

        let (width, height) = match (width, height) {
            (Some(width), Some(height)) => (width, height),
            (width, height) => {
                let current = self.backend.window_rect(handle)?;
                (
                    width.unwrap_or(current.width),
                    height.unwrap_or(current.height),
                )
            }
        };

        let rect = WindowRect::new(x, y, width, height);
        self.backend.set_window_rect(handle, rect)?;

        info!(
            event = "core.desktop.window_moved",
            handle = %handle,
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height
        );
        Ok(rect)
    }
}
