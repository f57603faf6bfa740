//! Configuration management for keybind.
//!
//! This module handles loading and saving the configuration file, which
//! holds application settings and the keymap.
//!
//! # Config File Location
//!
//! The path is taken from the `KEYBIND_CONFIG` environment variable if set,
//! otherwise the platform-specific config directory is used:
//! - Linux: `~/.config/keybind/config.toml`
//! - macOS: `~/Library/Application Support/keybind/config.toml`
//! - Windows: `C:\Users\<User>\AppData\Roaming\keybind\config.toml`

mod keymap;
mod settings;

pub use keymap::Keymap;
pub use settings::{Settings, DEFAULT_HISTORY_SIZE, DEFAULT_TICK_RATE_MS};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::keys::KeyError;

/// Environment variable overriding the config file path.
pub const CONFIG_ENV_VAR: &str = "KEYBIND_CONFIG";

/// Name of the application's config directory.
const APP_DIR_NAME: &str = "keybind";

/// Name of the config file.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur when loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The config directory could not be created.
    #[error("Failed to create configuration directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    /// The config file could not be read.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The config file could not be written.
    #[error("Failed to write configuration file: {0}")]
    WriteError(#[source] std::io::Error),

    /// The config file is not valid TOML or has the wrong shape.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A setting has an invalid value.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// The keymap names an action the application does not define.
    #[error("Unknown action in keymap: '{0}'")]
    UnknownAction(String),

    /// A key string in the keymap could not be decoded.
    #[error("Invalid key '{key}' for action '{action}': {source}")]
    InvalidKey {
        /// The action the key was bound to.
        action: String,
        /// The key string as written.
        key: String,
        /// Why decoding failed.
        #[source]
        source: KeyError,
    },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The full configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Application settings.
    pub settings: Settings,
    /// Key strings by action name.
    pub keymap: Keymap,
}

impl Config {
    /// Get the config file path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if `KEYBIND_CONFIG` is unset and
    /// the platform config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        let base_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the configuration from the default location.
    ///
    /// A missing config file is not an error; defaults are returned instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load the configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;

        info!(
            path = %path.display(),
            actions = config.keymap.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Save the configuration to a specific file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }

        fs::write(path, self.to_toml()?).map_err(ConfigError::WriteError)?;

        debug!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Serialize the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SerializeError` if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the settings and every key string in the keymap.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        self.keymap.validate()
    }
}
