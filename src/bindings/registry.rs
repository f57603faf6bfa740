//! Key binding registry.
//!
//! Stores one handler per [`Binding`] and resolves incoming key events
//! against them. Events with no matching binding pass through unchanged.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace, warn};

use crate::keys::{self, Binding};

/// A key event handler.
///
/// Receives the incoming event and returns the event to pass on: the same
/// event, a substituted one, or `None` to consume it.
pub type Handler = Arc<dyn Fn(KeyEvent) -> Option<KeyEvent> + Send + Sync>;

/// Registry mapping key bindings to handlers.
///
/// The registry is an owned value; share it with `&KeyRegistry` or wrap it
/// in an `Arc`. Registration takes the write lock. Dispatch holds the read
/// lock only while cloning the handler out, so handlers run unlocked and may
/// register further bindings without deadlocking.
pub struct KeyRegistry {
    /// Registered handlers by binding.
    handlers: RwLock<HashMap<Binding, Handler>>,
}

impl KeyRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Set the handler for a named key.
    ///
    /// Replaces any handler already bound to the same modifiers and key.
    /// A `KeyCode::Char` is registered as a character binding, following the
    /// same rules as [`KeyRegistry::set_char`].
    pub fn set_key<F>(&self, modifiers: KeyModifiers, code: KeyCode, handler: F)
    where
        F: Fn(KeyEvent) -> Option<KeyEvent> + Send + Sync + 'static,
    {
        self.set_handler(Binding::new(modifiers, code), Arc::new(handler));
    }

    /// Set the handler for a character.
    ///
    /// `'\t'` and `'\n'` are bound to the Tab and Enter keys instead, since
    /// terminals report those keys in either form.
    pub fn set_char<F>(&self, modifiers: KeyModifiers, ch: char, handler: F)
    where
        F: Fn(KeyEvent) -> Option<KeyEvent> + Send + Sync + 'static,
    {
        self.set_key(modifiers, KeyCode::Char(ch), handler);
    }

    /// Set the handler for a key string such as `"Ctrl+s"` or `"Shift+Tab"`.
    ///
    /// # Errors
    ///
    /// Returns a `KeyError` if the key string cannot be decoded. Nothing is
    /// registered in that case.
    pub fn set<F>(&self, keys: &str, handler: F) -> keys::Result<()>
    where
        F: Fn(KeyEvent) -> Option<KeyEvent> + Send + Sync + 'static,
    {
        let (modifiers, code) = keys::decode(keys)?;
        self.set_key(modifiers, code, handler);
        Ok(())
    }

    /// Set a shared handler for a binding.
    ///
    /// Lets one handler serve several bindings without re-wrapping it.
    pub fn set_handler(&self, binding: Binding, handler: Handler) {
        let replaced = self.write().insert(binding, handler).is_some();
        debug!(%binding, replaced, "Key binding set");
    }

    /// Dispatch a key event.
    ///
    /// Returns `None` for a `None` event. If a handler is bound to the
    /// event's modifiers and key, returns whatever the handler returns;
    /// otherwise returns the event unchanged.
    pub fn capture(&self, event: Option<KeyEvent>) -> Option<KeyEvent> {
        let event = event?;
        let binding = Binding::from_event(&event);

        // The guard is dropped at the end of this statement
        let handler = self.read().get(&binding).cloned();

        match handler {
            Some(handler) => {
                trace!(%binding, "Dispatching key event to handler");
                handler(event)
            }
            None => {
                trace!(%binding, "No binding, passing key event through");
                Some(event)
            }
        }
    }

    /// Check if a handler is bound to the given binding.
    pub fn contains(&self, binding: &Binding) -> bool {
        self.read().contains_key(binding)
    }

    /// Get the number of bindings.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if no bindings are registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Get a snapshot of all bindings, sorted by their key string.
    pub fn bindings(&self) -> Vec<Binding> {
        let mut bindings: Vec<Binding> = self.read().keys().copied().collect();
        bindings.sort_by_cached_key(|binding| binding.to_string());
        bindings
    }

    // The map is only ever changed by a single insert, so a poisoned lock
    // still guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<Binding, Handler>> {
        self.handlers.read().unwrap_or_else(|poisoned| {
            warn!("Key registry lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Binding, Handler>> {
        self.handlers.write().unwrap_or_else(|poisoned| {
            warn!("Key registry lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRegistry")
            .field("bindings", &self.bindings())
            .finish()
    }
}
