use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Opaque OS identifier of a top-level window.
///
/// Only meaningful while the window exists; the OS may hand the same value
/// to an unrelated window later. The decimal form is what gets persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowHandle(isize);

impl WindowHandle {
    pub fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    pub fn as_raw(&self) -> isize {
        self.0
    }
}

impl From<isize> for WindowHandle {
    fn from(raw: isize) -> Self {
        Self(raw)
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WindowHandle {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<isize>().map(Self)
    }
}

/// Point-in-time snapshot of a window taken during enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub title: String,
    pub handle: WindowHandle,
}

impl WindowRecord {
    pub fn new(title: impl Into<String>, handle: WindowHandle) -> Self {
        Self {
            title: title.into(),
            handle,
        }
    }
}

/// Window position and size in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from left/top/right/bottom edges as the OS reports them.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }
}

impl fmt::Display for WindowRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X={}, Y={}, Width={}, Height={}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Thread that pumps a window's message queue, and its process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOwner {
    pub thread_id: u32,
    pub process_id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_parses_decimal_string() {
        let handle: WindowHandle = "12345".parse().unwrap();
        assert_eq!(handle.as_raw(), 12345);
        assert_eq!(handle.to_string(), "12345");
    }

    #[test]
    fn test_handle_parse_tolerates_whitespace() {
        let handle: WindowHandle = " 42 ".parse().unwrap();
        assert_eq!(handle, WindowHandle::from_raw(42));
    }

    #[test]
    fn test_handle_parse_rejects_garbage() {
        assert!("notepad".parse::<WindowHandle>().is_err());
        assert!("".parse::<WindowHandle>().is_err());
    }

    #[test]
    fn test_rect_from_edges() {
        let rect = WindowRect::from_edges(-7, 0, 459, 359);
        assert_eq!(rect, WindowRect::new(-7, 0, 466, 359));
    }

    #[test]
    fn test_rect_display_matches_coordinate_format() {
        let rect = WindowRect::new(-7, 0, 466, 359);
        assert_eq!(rect.to_string(), "X=-7, Y=0, Width=466, Height=359");
    }
}
