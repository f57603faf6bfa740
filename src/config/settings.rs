//! Application settings configuration.

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::EnvFilter;

use super::{ConfigError, Result};

/// Default event poll interval in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Default number of dispatch outcomes kept on screen.
pub const DEFAULT_HISTORY_SIZE: usize = 50;

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// How long to wait for a terminal event before ticking, in milliseconds.
    pub tick_rate_ms: u64,
    /// How many dispatch outcomes to keep.
    pub history_size: usize,
    /// Whether the bindings panel is shown at startup.
    pub show_help: bool,
    /// Log filter directive, used when `RUST_LOG` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Settings {
    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` if the tick rate or the
    /// history size is zero, or if the log filter does not parse.
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }

        if self.history_size == 0 {
            return Err(ConfigError::ValidationError(
                "history_size must be greater than zero".to_string(),
            ));
        }

        if let Some(filter) = &self.log_filter {
            EnvFilter::try_new(filter).map_err(|e| {
                ConfigError::ValidationError(format!("invalid log_filter '{filter}': {e}"))
            })?;
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            history_size: DEFAULT_HISTORY_SIZE,
            show_help: true,
            log_filter: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_valid() {
        let settings = Settings::default();
        assert_eq!(settings.tick_rate_ms, DEFAULT_TICK_RATE_MS);
        assert_eq!(settings.history_size, DEFAULT_HISTORY_SIZE);
        assert!(settings.show_help);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let settings = Settings {
            tick_rate_ms: 0,
            ..Settings::default()
        };

        let result = settings.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("tick_rate_ms"));
    }

    #[test]
    fn test_zero_history_size_rejected() {
        let settings = Settings {
            history_size: 0,
            ..Settings::default()
        };

        let result = settings.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("history_size"));
    }

    #[test]
    fn test_large_history_size_accepted() {
        let settings = Settings {
            history_size: usize::MAX,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_log_filter_validated() {
        let valid = Settings {
            log_filter: Some("keybind=debug,warn".to_string()),
            ..Settings::default()
        };
        assert!(valid.validate().is_ok());

        let invalid = Settings {
            log_filter: Some("keybind=loud".to_string()),
            ..Settings::default()
        };
        let err = invalid.validate().unwrap_err();
        assert!(err.to_string().contains("log_filter"));
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings: Settings = toml::from_str("show_help = false").unwrap();
        assert!(!settings.show_help);
        assert_eq!(settings.tick_rate_ms, DEFAULT_TICK_RATE_MS);
        assert_eq!(settings.log_filter, None);
    }
}
