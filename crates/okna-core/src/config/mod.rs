//! # Configuration System
//!
//! Hierarchical TOML configuration for okna.
//!
//! ## Configuration Hierarchy
//!
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.okna/config.toml`
//! 3. **Project config** - `./.okna/config.toml`
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use okna_core::config::OknaConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OknaConfig::load_hierarchy()?;
//!     println!("names stored in {}", config.names_file().display());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{HotkeyConfig, OknaConfig, ShellConfig, StorageConfig};
pub use validation::validate_config;

impl OknaConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
