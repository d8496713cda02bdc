//! Default values for configuration fields.

use std::path::PathBuf;

/// File name used for the names store when none is configured.
pub const DEFAULT_NAMES_FILE: &str = "window_names.json";

/// Key that releases every frozen window.
pub const DEFAULT_UNFREEZE_ALL_HOTKEY: &str = "f";

/// Pause between selection rounds.
pub const DEFAULT_PAUSE_MS: u64 = 1000;

pub fn default_names_file() -> PathBuf {
    PathBuf::from(DEFAULT_NAMES_FILE)
}

pub fn default_unfreeze_all_hotkey() -> String {
    DEFAULT_UNFREEZE_ALL_HOTKEY.to_string()
}
