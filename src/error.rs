//! Centralized error types for keybind.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.
//!
//! Binding registration and dispatch never fail; errors only come from
//! decoding key strings, loading configuration and driving the terminal.

use thiserror::Error;

use crate::config::ConfigError;
use crate::keys::KeyError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Key string errors.
    #[error("{0}")]
    Key(#[from] KeyError),

    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// IO errors (file system, terminal output).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Key(e) => match e {
                KeyError::Empty => "No key given.".to_string(),
                KeyError::UnknownModifier(m) => format!("'{}' is not a known modifier.", m),
                KeyError::UnknownKey(k) => format!("'{}' is not a known key.", k),
                KeyError::Unencodable(k) => format!("{} cannot be written as a key string.", k),
            },
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                ConfigError::UnknownAction(name) => {
                    format!("The keymap refers to an unknown action '{}'.", name)
                }
                ConfigError::InvalidKey { action, key, .. } => {
                    format!("The key '{}' bound to '{}' is not valid.", key, action)
                }
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Check if this error is critical and prevents the application from running.
    pub fn is_critical(&self) -> bool {
        matches!(self, AppError::Config(_) | AppError::Terminal(_))
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Key(_)
            | AppError::Config(ConfigError::InvalidKey { .. }) => {
                Some("Write keys like 'q', 'Ctrl+s', 'Alt+Shift+Tab' or 'F5'.")
            }
            AppError::Config(ConfigError::UnknownAction(_)) => {
                Some("Known actions are: help, quit, shout, swallow.")
            }
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Run 'keybind default-config' to see a valid configuration file.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_key_error() {
        let app_err: AppError = KeyError::Empty.into();
        assert!(matches!(app_err, AppError::Key(KeyError::Empty)));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(
            app_err,
            AppError::Config(ConfigError::NoConfigDir)
        ));
    }

    #[test]
    fn test_user_message_unknown_key() {
        let err = AppError::Key(KeyError::UnknownKey("nope".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("nope"));
        assert!(msg.contains("not a known key"));
    }

    #[test]
    fn test_user_message_invalid_key_in_keymap() {
        let err = AppError::Config(ConfigError::InvalidKey {
            action: "quit".to_string(),
            key: "Ctrl+".to_string(),
            source: KeyError::UnknownKey("Ctrl+".to_string()),
        });
        let msg = err.user_message();
        assert!(msg.contains("Ctrl+"));
        assert!(msg.contains("quit"));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "history_size must be greater than zero".to_string(),
        ));
        assert!(err.user_message().contains("history_size"));
    }

    #[test]
    fn test_is_critical() {
        assert!(AppError::Config(ConfigError::NoConfigDir).is_critical());
        assert!(AppError::terminal("raw mode").is_critical());
        assert!(!AppError::Key(KeyError::Empty).is_critical());
    }

    #[test]
    fn test_suggested_action_unknown_action() {
        let err = AppError::Config(ConfigError::UnknownAction("launch".to_string()));
        let action = err.suggested_action();
        assert!(action.is_some());
        assert!(action.unwrap().contains("quit"));
    }

    #[test]
    fn test_suggested_action_key_error() {
        let err = AppError::Key(KeyError::UnknownModifier("Hold".to_string()));
        assert!(err.suggested_action().unwrap().contains("Ctrl+s"));
    }

    #[test]
    fn test_no_suggested_action_for_io() {
        let err = AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(err.suggested_action().is_none());
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("test error");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: test error");
    }

    #[test]
    fn test_other_error() {
        let err = AppError::other("something went wrong");
        assert_eq!(err.user_message(), "something went wrong");
    }
}
