//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.okna/config.toml` (global user preferences)
//! 3. **Project config** - `./.okna/config.toml` (directory-specific overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority, applied by the binary)

use crate::config::types::{HotkeyConfig, OknaConfig, ShellConfig, StorageConfig};
use crate::errors::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Load configuration from the hierarchy of config files.
///
/// Missing config files are not errors. A file that exists but cannot be
/// read or parsed is. The result is not validated here: command-line
/// overrides still apply on top, so callers validate the final config.
pub fn load_hierarchy() -> Result<OknaConfig, ConfigError> {
    let mut config = OknaConfig::default();

    if let Some(path) = user_config_path() {
        if let Some(user_config) = load_config_file(&path)? {
            config = merge_configs(config, user_config);
        }
    } else {
        warn!(
            event = "core.config.home_dir_not_found",
            "Could not determine home directory - skipping user config"
        );
    }

    let project_path = std::env::current_dir()?.join(".okna").join("config.toml");
    if let Some(project_config) = load_config_file(&project_path)? {
        config = merge_configs(config, project_config);
    }

    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".okna").join("config.toml"))
}

/// Load a configuration file, returning `Ok(None)` if it does not exist.
pub fn load_config_file(path: &Path) -> Result<Option<OknaConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(
                event = "core.config.file_not_found",
                path = %path.display()
            );
            return Ok(None);
        }
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    let config = toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        message: format!("'{}': {}", path.display(), e),
    })?;

    debug!(event = "core.config.file_loaded", path = %path.display());
    Ok(Some(config))
}

/// Merge two configurations, with override_config taking precedence.
///
/// Fields left unset in the override keep the base value.
pub fn merge_configs(base: OknaConfig, override_config: OknaConfig) -> OknaConfig {
    OknaConfig {
        storage: StorageConfig {
            names_file: override_config
                .storage
                .names_file
                .or(base.storage.names_file),
        },
        hotkey: HotkeyConfig {
            enabled: override_config.hotkey.enabled.or(base.hotkey.enabled),
            unfreeze_all: override_config
                .hotkey
                .unfreeze_all
                .or(base.hotkey.unfreeze_all),
        },
        shell: ShellConfig {
            pause_ms: override_config.shell.pause_ms.or(base.shell.pause_ms),
        },
    }
}
