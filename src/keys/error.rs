//! Key string error types.

use thiserror::Error;

/// Errors that can occur when decoding or encoding key strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The key string was empty or only whitespace.
    #[error("Empty key string")]
    Empty,

    /// A modifier token was not recognized.
    #[error("Unknown modifier: '{0}'")]
    UnknownModifier(String),

    /// The key token was not recognized.
    #[error("Unknown key: '{0}'")]
    UnknownKey(String),

    /// The key code has no string form.
    #[error("Key cannot be written as a key string: {0}")]
    Unencodable(String),
}

/// Result type for key string operations.
pub type Result<T> = std::result::Result<T, KeyError>;
