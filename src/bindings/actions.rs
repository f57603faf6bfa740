//! Named handlers for keymap files.
//!
//! A keymap names actions rather than handlers, so the embedding
//! application registers its handlers here under those names.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crossterm::event::KeyEvent;

use super::Handler;

/// Table of handlers by action name.
#[derive(Clone, Default)]
pub struct Actions {
    /// Handlers by action name.
    handlers: HashMap<String, Handler>,
}

impl Actions {
    /// Create an empty action table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action, replacing any action with the same name.
    pub fn insert<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(KeyEvent) -> Option<KeyEvent> + Send + Sync + 'static,
    {
        self.handlers.insert(name.into(), Arc::new(handler));
    }

    /// Add an action, builder style.
    pub fn with<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(KeyEvent) -> Option<KeyEvent> + Send + Sync + 'static,
    {
        self.insert(name, handler);
        self
    }

    /// Get the handler for an action.
    pub fn get(&self, name: &str) -> Option<&Handler> {
        self.handlers.get(name)
    }

    /// Check if an action is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Get all action names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actions")
            .field("names", &self.names())
            .finish()
    }
}
