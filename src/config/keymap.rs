//! Keymap configuration.
//!
//! A keymap lists, for each named action, the key strings that trigger it:
//!
//! ```toml
//! [keymap]
//! quit = ["Ctrl+c", "q"]
//! help = ["?", "F1"]
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ConfigError, Result};
use crate::bindings::{Actions, Handler, KeyRegistry};
use crate::keys::{self, Binding};

/// Mapping from action names to the key strings bound to them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Keymap {
    /// Key strings by action name.
    actions: BTreeMap<String, Vec<String>>,
}

impl Keymap {
    /// Create an empty keymap.
    pub fn new() -> Self {
        Self {
            actions: BTreeMap::new(),
        }
    }

    /// Bind key strings to an action, replacing its previous keys.
    pub fn bind<I, S>(&mut self, action: impl Into<String>, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions
            .insert(action.into(), keys.into_iter().map(Into::into).collect());
    }

    /// Get the key strings bound to an action.
    pub fn keys_for(&self, action: &str) -> &[String] {
        self.actions.get(action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over actions and their key strings, ordered by action name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.actions
            .iter()
            .map(|(action, keys)| (action.as_str(), keys.as_slice()))
    }

    /// Get the number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if the keymap has no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Validate that every key string decodes.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidKey` for the first key string that
    /// cannot be decoded.
    pub fn validate(&self) -> Result<()> {
        for (action, key) in self.key_strings() {
            decode_for(action, key)?;
        }
        Ok(())
    }

    /// Resolve every key string against an action table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownAction` if the keymap names an action
    /// missing from `actions`, or `ConfigError::InvalidKey` for a key string
    /// that cannot be decoded.
    pub fn resolve(&self, actions: &Actions) -> Result<Vec<(Binding, Handler)>> {
        let mut resolved = Vec::new();
        let mut owners: HashMap<Binding, &str> = HashMap::new();

        for (action, keys) in self.entries() {
            let handler = actions
                .get(action)
                .ok_or_else(|| ConfigError::UnknownAction(action.to_string()))?;

            for key in keys {
                let (modifiers, code) = decode_for(action, key)?;
                let binding = Binding::new(modifiers, code);

                if let Some(previous) = owners.insert(binding, action) {
                    warn!(%binding, previous, action, "Key bound to more than one action");
                }
                resolved.push((binding, Arc::clone(handler)));
            }
        }

        Ok(resolved)
    }

    /// Register the keymap's bindings in a registry.
    ///
    /// All key strings are resolved before anything is registered, so on
    /// error the registry is left untouched. Returns the number of bindings
    /// registered.
    ///
    /// # Errors
    ///
    /// See [`Keymap::resolve`].
    pub fn apply(&self, registry: &KeyRegistry, actions: &Actions) -> Result<usize> {
        let resolved = self.resolve(actions)?;
        let count = resolved.len();

        for (binding, handler) in resolved {
            registry.set_handler(binding, handler);
        }

        debug!(count, actions = self.len(), "Keymap applied");
        Ok(count)
    }

    fn key_strings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries()
            .flat_map(|(action, keys)| keys.iter().map(move |key| (action, key.as_str())))
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let mut keymap = Self::new();
        keymap.bind("quit", ["Ctrl+c", "q"]);
        keymap.bind("help", ["?", "F1"]);
        keymap.bind("swallow", ["Esc"]);
        keymap.bind("shout", ["s", "Alt+s"]);
        keymap
    }
}

fn decode_for(action: &str, key: &str) -> Result<(KeyModifiers, KeyCode)> {
    keys::decode(key).map_err(|source| ConfigError::InvalidKey {
        action: action.to_string(),
        key: key.to_string(),
        source,
    })
}
