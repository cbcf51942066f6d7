//! Configuration system for Kitsy
//!
//! Describes which engine functions the toolkit hooks for its own wiring and
//! which subsystems are rebuilt after injection. Defaults come from
//! `kitsy-sdk`; a TOML file overrides them when targeting another engine
//! release.
//!
//! # Example
//!
//! ```toml
//! debug = true
//! reinit = ["scriptModule", "scriptInterpreter"]
//!
//! [engine]
//! load_game = "parseWorld"
//! ```

mod loader;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use loader::{config_path, CONFIG_ENV, DEFAULT_CONFIG_FILE};

/// Configuration system errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Engine functions the toolkit hooks for its own wiring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginePaths {
    /// Receives raw game data; dialogue tag syntax is rewritten here
    pub load_game: String,

    /// Runs when a dialogue box closes; deferred tags drain here
    pub dialog_exit: String,

    /// Runs when game data is cleared; deferred tags are dropped here
    pub reset: String,

    /// Start entry point wrapped by the bootstrap
    pub start: String,
}

impl Default for EnginePaths {
    fn default() -> Self {
        Self {
            load_game: kitsy_sdk::LOAD_GAME.to_string(),
            dialog_exit: kitsy_sdk::DIALOG_EXIT.to_string(),
            reset: kitsy_sdk::RESET_GAME.to_string(),
            start: kitsy_sdk::START_GAME.to_string(),
        }
    }
}

/// Toolkit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitsyConfig {
    /// Config version for future migration support
    pub version: u32,

    /// Enable debug logging
    pub debug: bool,

    /// Explicit tracing filter, overrides `debug`
    pub log_filter: Option<String>,

    /// Subsystems rebuilt after injections, in order
    pub reinit: Vec<String>,

    /// Engine function paths
    pub engine: EnginePaths,
}

impl Default for KitsyConfig {
    fn default() -> Self {
        Self {
            version: 1,
            debug: false,
            log_filter: None,
            reinit: kitsy_sdk::REINIT_ORDER.iter().map(|s| s.to_string()).collect(),
            engine: EnginePaths::default(),
        }
    }
}

impl KitsyConfig {
    /// Load config from the default location, creating it if missing.
    pub fn load() -> ConfigResult<Self> {
        let path = config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            let default = Self::default();
            default.save_to(&path)?;
            tracing::info!("Created default config at {:?}", path);
            Ok(default)
        }
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reload config from the default location.
    pub fn reload(&mut self) -> ConfigResult<()> {
        *self = Self::load_from(&config_path())?;
        Ok(())
    }

    /// Tracing filter directive implied by this config
    pub fn filter_directive(&self) -> String {
        match &self.log_filter {
            Some(filter) => filter.clone(),
            None if self.debug => "debug".to_string(),
            None => "info".to_string(),
        }
    }
}
