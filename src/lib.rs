//! keybind - key binding registry and dispatcher for terminal user interfaces.
//!
//! Handlers are registered for a modifier plus a named key or a character,
//! and incoming key events are dispatched to the matching handler. Events
//! with no binding pass through unchanged.
//!
//! ```
//! use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
//! use keybind::KeyRegistry;
//!
//! let registry = KeyRegistry::new();
//! registry.set_key(KeyModifiers::NONE, KeyCode::Esc, |_| None);
//! registry.set("Ctrl+s", |event| Some(event)).unwrap();
//!
//! let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
//! assert_eq!(registry.capture(Some(esc)), None);
//!
//! let other = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
//! assert_eq!(registry.capture(Some(other)), Some(other));
//! ```

pub mod app;
pub mod bindings;
pub mod config;
pub mod error;
pub mod events;
pub mod keys;
pub mod logging;
pub mod ui;

pub use bindings::{Actions, Handler, KeyRegistry};
pub use error::{AppError, Result};
pub use keys::{Binding, KeyError};
