//! Key identities and key strings.
//!
//! This module provides:
//! - The composite lookup key used by the registry ([`Binding`])
//! - Parsing and formatting of human-readable key strings like `Ctrl+Alt+x`

mod binding;
mod codec;
mod error;

pub use binding::Binding;
pub use codec::{decode, encode};
pub use error::{KeyError, Result};
