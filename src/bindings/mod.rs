//! Key bindings.
//!
//! This module provides:
//! - The key binding registry and event dispatch
//! - A table of named actions that keymaps refer to

mod actions;
mod registry;

pub use actions::Actions;
pub use registry::{Handler, KeyRegistry};
