//! Configuration type definitions for okna.
//!
//! These types are deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [storage]
//! names_file = "window_names.json"
//!
//! [hotkey]
//! enabled = true
//! unfreeze_all = "f"
//!
//! [shell]
//! pause_ms = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.okna/config.toml`
/// 2. Project config: `./.okna/config.toml`
///
/// Project config values override user config values. Every field is optional
/// so that a partial file only overrides what it names; the accessor methods
/// resolve the effective value.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OknaConfig {
    /// Where custom window names are persisted
    #[serde(default)]
    pub storage: StorageConfig,

    /// Emergency unfreeze hotkey
    #[serde(default)]
    pub hotkey: HotkeyConfig,

    /// Interactive shell behaviour
    #[serde(default)]
    pub shell: ShellConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// Path of the names file. Relative paths resolve against the working
    /// directory. Default: `window_names.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HotkeyConfig {
    /// Whether the unfreeze-all hotkey is registered at all. Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Key binding that unfreezes every frozen window, e.g. `"f"` or
    /// `"ctrl+alt+u"`. Default: `"f"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unfreeze_all: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShellConfig {
    /// Pause in milliseconds after leaving a window's action loop.
    /// Default: 1000.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_ms: Option<u64>,
}

impl OknaConfig {
    pub fn names_file(&self) -> PathBuf {
        self.storage
            .names_file
            .clone()
            .unwrap_or_else(super::defaults::default_names_file)
    }

    pub fn hotkey_enabled(&self) -> bool {
        self.hotkey.enabled.unwrap_or(true)
    }

    pub fn unfreeze_all_hotkey(&self) -> String {
        self.hotkey
            .unfreeze_all
            .clone()
            .unwrap_or_else(super::defaults::default_unfreeze_all_hotkey)
    }

    pub fn pause_ms(&self) -> u64 {
        self.shell
            .pause_ms
            .unwrap_or(super::defaults::DEFAULT_PAUSE_MS)
    }
}
