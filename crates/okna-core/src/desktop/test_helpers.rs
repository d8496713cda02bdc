//! In-memory desktop for tests.
//!
//! Public so the CLI crate can drive the shell against it.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use super::errors::DesktopError;
use super::traits::DesktopBackend;
use super::types::{WindowHandle, WindowOwner, WindowRect};
use crate::freeze::FreezeError;

#[derive(Debug, Clone)]
struct FakeWindow {
    handle: WindowHandle,
    title: String,
    visible: bool,
    rect: WindowRect,
    owner: Option<WindowOwner>,
}

#[derive(Debug, Default)]
struct FakeState {
    windows: Vec<FakeWindow>,
    suspend_counts: HashMap<u32, u32>,
    denied_threads: HashSet<u32>,
    move_count: usize,
}

/// Scriptable stand-in for the OS window system.
///
/// Each window gets a distinct owner thread (`thread_id == handle`) unless
/// overridden with [`FakeDesktop::set_owner`].
#[derive(Debug, Default)]
pub struct FakeDesktop {
    state: Mutex<FakeState>,
}

impl FakeDesktop {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn insert(&self, raw: isize, title: &str, visible: bool) {
        let handle = WindowHandle::from_raw(raw);
        let mut state = self.state();
        state.windows.retain(|w| w.handle != handle);
        state.windows.push(FakeWindow {
            handle,
            title: title.to_string(),
            visible,
            rect: WindowRect::new(0, 0, 640, 480),
            owner: Some(WindowOwner {
                thread_id: raw as u32,
                process_id: 1000 + raw as u32,
            }),
        });
    }

    pub fn add_window(&self, raw: isize, title: &str) {
        self.insert(raw, title, true);
    }

    pub fn add_hidden_window(&self, raw: isize, title: &str) {
        self.insert(raw, title, false);
    }

    pub fn destroy_window(&self, raw: isize) {
        let handle = WindowHandle::from_raw(raw);
        self.state().windows.retain(|w| w.handle != handle);
    }

    pub fn set_rect(&self, raw: isize, rect: WindowRect) {
        let handle = WindowHandle::from_raw(raw);
        if let Some(window) = self.state().windows.iter_mut().find(|w| w.handle == handle) {
            window.rect = rect;
        }
    }

    pub fn set_owner(&self, raw: isize, owner: Option<WindowOwner>) {
        let handle = WindowHandle::from_raw(raw);
        if let Some(window) = self.state().windows.iter_mut().find(|w| w.handle == handle) {
            window.owner = owner;
        }
    }

    /// Make `OpenThread` fail for this thread id.
    pub fn deny_thread(&self, thread_id: u32) {
        self.state().denied_threads.insert(thread_id);
    }

    pub fn allow_thread(&self, thread_id: u32) {
        self.state().denied_threads.remove(&thread_id);
    }

    pub fn suspend_count(&self, thread_id: u32) -> u32 {
        self.state()
            .suspend_counts
            .get(&thread_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn move_count(&self) -> usize {
        self.state().move_count
    }

    fn find(&self, handle: WindowHandle) -> Option<FakeWindow> {
        self.state()
            .windows
            .iter()
            .find(|w| w.handle == handle)
            .cloned()
    }
}

impl DesktopBackend for FakeDesktop {
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>, DesktopError> {
        Ok(self.state().windows.iter().map(|w| w.handle).collect())
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        self.find(handle).is_some()
    }

    fn is_visible(&self, handle: WindowHandle) -> bool {
        self.find(handle).is_some_and(|w| w.visible)
    }

    fn window_text(&self, handle: WindowHandle) -> String {
        self.find(handle).map(|w| w.title).unwrap_or_default()
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<WindowRect, DesktopError> {
        self.find(handle)
            .map(|w| w.rect)
            .ok_or_else(|| DesktopError::GeometryFailed {
                handle,
                message: "no such window".to_string(),
            })
    }

    fn set_window_rect(&self, handle: WindowHandle, rect: WindowRect) -> Result<(), DesktopError> {
        let mut state = self.state();
        state.move_count += 1;
        match state.windows.iter_mut().find(|w| w.handle == handle) {
            Some(window) => {
                window.rect = rect;
                Ok(())
            }
            None => Err(DesktopError::GeometryFailed {
                handle,
                message: "no such window".to_string(),
            }),
        }
    }

    fn window_owner(&self, handle: WindowHandle) -> Option<WindowOwner> {
        self.find(handle).and_then(|w| w.owner)
    }

    fn suspend_thread(&self, thread_id: u32) -> Result<u32, FreezeError> {
        let mut state = self.state();
        if state.denied_threads.contains(&thread_id) {
            return Err(FreezeError::OpenFailed {
                thread_id,
                message: "access denied".to_string(),
            });
        }
        let count = state.suspend_counts.entry(thread_id).or_insert(0);
        let previous = *count;
        *count += 1;
        Ok(previous)
    }

    fn resume_thread(&self, thread_id: u32) -> Result<u32, FreezeError> {
        let mut state = self.state();
        if state.denied_threads.contains(&thread_id) {
            return Err(FreezeError::OpenFailed {
                thread_id,
                message: "access denied".to_string(),
            });
        }
        let count = state.suspend_counts.entry(thread_id).or_insert(0);
        let previous = *count;
        *count = count.saturating_sub(1);
        Ok(previous)
    }
}
