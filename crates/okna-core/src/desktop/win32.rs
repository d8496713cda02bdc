//! Win32 implementation of [`DesktopBackend`].

use tracing::{debug, warn};
use windows::Win32::Foundation::{CloseHandle, HANDLE, HWND, LPARAM, RECT};
use windows::Win32::System::Threading::{
    OpenThread, ResumeThread, SuspendThread, THREAD_ACCESS_RIGHTS, THREAD_ALL_ACCESS,
    THREAD_SUSPEND_RESUME,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowRect, GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId,
    IsWindow, IsWindowVisible, MoveWindow, SetProcessDPIAware,
};
use windows::core::BOOL;

use super::errors::DesktopError;
use super::traits::DesktopBackend;
use super::types::{WindowHandle, WindowOwner, WindowRect};
use crate::freeze::FreezeError;

/// `SuspendThread`/`ResumeThread` return `(DWORD)-1` on failure.
const THREAD_CALL_FAILED: u32 = u32::MAX;

fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.as_raw() as *mut _)
}

unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam carries the `&mut Vec` passed by `top_level_windows`,
    // which outlives the synchronous EnumWindows call.
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<WindowHandle>) };
    handles.push(WindowHandle::from_raw(hwnd.0 as isize));
    true.into()
}

/// Thread handle closed on drop, so every exit path releases it.
struct OwnedThreadHandle(HANDLE);

impl OwnedThreadHandle {
    fn open(access: THREAD_ACCESS_RIGHTS, thread_id: u32) -> Result<Self, FreezeError> {
        // SAFETY: OpenThread has no memory-safety preconditions.
        let handle = unsafe { OpenThread(access, false, thread_id) }.map_err(|e| {
            FreezeError::OpenFailed {
                thread_id,
                message: e.to_string(),
            }
        })?;
        if handle.is_invalid() {
            return Err(FreezeError::OpenFailed {
                thread_id,
                message: "OpenThread returned an invalid handle".to_string(),
            });
        }
        Ok(Self(handle))
    }
}

impl Drop for OwnedThreadHandle {
    fn drop(&mut self) {
        // SAFETY: the handle came from a successful OpenThread and is closed once.
        if let Err(e) = unsafe { CloseHandle(self.0) } {
            warn!(event = "core.desktop.thread_handle_close_failed", error = %e);
        }
    }
}

/// Desktop backend talking to user32/kernel32.
pub struct Win32Desktop {
    _private: (),
}

impl Win32Desktop {
    /// Create the backend and mark the process DPI-aware so that positions
    /// and sizes are physical pixels.
    pub fn new() -> Self {
        // SAFETY: no preconditions; failure only means the awareness was
        // already set (e.g. by a manifest).
        let aware = unsafe { SetProcessDPIAware() };
        if !aware.as_bool() {
            debug!(event = "core.desktop.dpi_awareness_unchanged");
        }
        Self { _private: () }
    }
}

impl Default for Win32Desktop {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopBackend for Win32Desktop {
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>, DesktopError> {
        let mut handles: Vec<WindowHandle> = Vec::new();
        // SAFETY: the callback only touches `handles`, which lives across the call.
        unsafe {
            EnumWindows(
                Some(collect_window),
                LPARAM(&mut handles as *mut Vec<WindowHandle> as isize),
            )
        }
        .map_err(|e| DesktopError::EnumerationFailed {
            message: e.to_string(),
        })?;
        Ok(handles)
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        // SAFETY: IsWindow accepts any value, including stale handles.
        unsafe { IsWindow(Some(hwnd(handle))) }.as_bool()
    }

    fn is_visible(&self, handle: WindowHandle) -> bool {
        // SAFETY: as above.
        unsafe { IsWindowVisible(hwnd(handle)) }.as_bool()
    }

    fn window_text(&self, handle: WindowHandle) -> String {
        let hwnd = hwnd(handle);
        // SAFETY: buffer is sized from GetWindowTextLengthW plus the terminator.
        unsafe {
            let len = GetWindowTextLengthW(hwnd);
            if len <= 0 {
                return String::new();
            }
            let mut buf = vec![0u16; len as usize + 1];
            let copied = GetWindowTextW(hwnd, &mut buf);
            if copied <= 0 {
                return String::new();
            }
            String::from_utf16_lossy(&buf[..copied as usize])
        }
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<WindowRect, DesktopError> {
        let mut rect = RECT::default();
        // SAFETY: `rect` is a valid out-pointer for the duration of the call.
        unsafe { GetWindowRect(hwnd(handle), &mut rect) }.map_err(|e| {
            DesktopError::GeometryFailed {
                handle,
                message: e.to_string(),
            }
        })?;
        Ok(WindowRect::from_edges(
            rect.left,
            rect.top,
            rect.right,
            rect.bottom,
        ))
    }

    fn set_window_rect(&self, handle: WindowHandle, rect: WindowRect) -> Result<(), DesktopError> {
        // SAFETY: MoveWindow validates the handle itself.
        unsafe {
            MoveWindow(
                hwnd(handle),
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                true,
            )
        }
        .map_err(|e| DesktopError::GeometryFailed {
            handle,
            message: e.to_string(),
        })
    }

    fn window_owner(&self, handle: WindowHandle) -> Option<WindowOwner> {
        let mut process_id = 0u32;
        // SAFETY: `process_id` is a valid out-pointer for the duration of the call.
        let thread_id = unsafe { GetWindowThreadProcessId(hwnd(handle), Some(&mut process_id)) };
        if thread_id == 0 {
            return None;
        }
        Some(WindowOwner {
            thread_id,
            process_id,
        })
    }

    fn suspend_thread(&self, thread_id: u32) -> Result<u32, FreezeError> {
        let thread = OwnedThreadHandle::open(THREAD_SUSPEND_RESUME, thread_id)?;
        // SAFETY: `thread` holds an open handle with suspend rights.
        let previous = unsafe { SuspendThread(thread.0) };
        if previous == THREAD_CALL_FAILED {
            return Err(FreezeError::SuspendFailed {
                thread_id,
                message: windows::core::Error::from_win32().to_string(),
            });
        }
        Ok(previous)
    }

    fn resume_thread(&self, thread_id: u32) -> Result<u32, FreezeError> {
        let thread = OwnedThreadHandle::open(THREAD_ALL_ACCESS, thread_id)?;
        // SAFETY: `thread` holds an open handle with resume rights.
        let previous = unsafe { ResumeThread(thread.0) };
        if previous == THREAD_CALL_FAILED {
            return Err(FreezeError::ResumeFailed {
                thread_id,
                message: windows::core::Error::from_win32().to_string(),
            });
        }
        Ok(previous)
    }
}
