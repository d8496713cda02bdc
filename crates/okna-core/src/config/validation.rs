use crate::config::types::OknaConfig;
use crate::errors::ConfigError;
use crate::hotkey::parse_hotkey;

/// Upper bound for the shell pause; anything longer makes the prompt look hung.
pub const MAX_PAUSE_MS: u64 = 60_000;

/// Validate the merged configuration.
pub fn validate_config(config: &OknaConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.storage.names_file
        && path.as_os_str().is_empty()
    {
        return Err(ConfigError::InvalidConfiguration {
            message: "storage.names_file must not be empty".to_string(),
        });
    }

    if config.hotkey_enabled()
        && let Some(key) = &config.hotkey.unfreeze_all
        && let Err(e) = parse_hotkey(key)
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("hotkey.unfreeze_all: {}", e),
        });
    }

    if let Some(pause_ms) = config.shell.pause_ms
        && pause_ms > MAX_PAUSE_MS
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "shell.pause_ms must be at most {} (got {})",
                MAX_PAUSE_MS, pause_ms
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{HotkeyConfig, ShellConfig, StorageConfig};
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&OknaConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_names_file_rejected() {
        let config = OknaConfig {
            storage: StorageConfig {
                names_file: Some(PathBuf::new()),
            },
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("names_file"));
    }

    #[test]
    fn test_bad_hotkey_rejected() {
        let config = OknaConfig {
            hotkey: HotkeyConfig {
                enabled: None,
                unfreeze_all: Some("ctrl+".to_string()),
            },
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("hotkey.unfreeze_all"));
    }

    #[test]
    fn test_bad_hotkey_ignored_when_disabled() {
        let config = OknaConfig {
            hotkey: HotkeyConfig {
                enabled: Some(false),
                unfreeze_all: Some("ctrl+".to_string()),
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_pause_too_long_rejected() {
        let config = OknaConfig {
            shell: ShellConfig {
                pause_ms: Some(MAX_PAUSE_MS + 1),
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
