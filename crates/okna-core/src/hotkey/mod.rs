//! Global hotkey that unfreezes every frozen window.
//!
//! The hotkey works even when the shell is blocked on input or the focused
//! window is itself frozen. A bare key such as `f` is watched without being
//! swallowed, so it can still be typed; chords with modifiers are registered
//! with the system.

pub mod errors;
pub mod listener;
pub mod parse;

pub use errors::HotkeyError;
pub use listener::{HotkeyListener, handle_unfreeze_all, spawn_unfreeze_listener};
pub use parse::{HotkeyRoute, parse_hotkey, route_hotkey};
