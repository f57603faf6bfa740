//! Composite lookup key for registered handlers.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::codec::{encode, modifier_prefix};

/// The structured key a handler is registered under.
///
/// Named keys and literal characters live in separate variants, so a named
/// key can never collide with a character that happens to share its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// A named key such as `Enter`, `Tab` or `F5`.
    Key {
        /// Modifiers held with the key.
        modifiers: KeyModifiers,
        /// The named key. Never `KeyCode::Char`.
        code: KeyCode,
    },
    /// A literal character.
    Char {
        /// Modifiers held with the character.
        modifiers: KeyModifiers,
        /// The character.
        ch: char,
    },
}

impl Binding {
    /// Build the binding a registration for `(modifiers, code)` is stored under.
    ///
    /// Terminals report Tab and Enter either as named keys or as the literal
    /// `'\t'` / `'\n'` characters, so those two characters are folded onto
    /// their named keys. Any other `KeyCode::Char` becomes a character binding.
    pub fn new(modifiers: KeyModifiers, code: KeyCode) -> Self {
        match code {
            KeyCode::Char('\t') => Self::Key {
                modifiers,
                code: KeyCode::Tab,
            },
            KeyCode::Char('\n') => Self::Key {
                modifiers,
                code: KeyCode::Enter,
            },
            KeyCode::Char(ch) => Self::Char { modifiers, ch },
            code => Self::Key { modifiers, code },
        }
    }

    /// Build the binding an incoming event is looked up under.
    ///
    /// Unlike [`Binding::new`] no folding happens here: a `KeyCode::Char`
    /// event is always classified as a character.
    pub fn from_event(event: &KeyEvent) -> Self {
        match event.code {
            KeyCode::Char(ch) => Self::Char {
                modifiers: event.modifiers,
                ch,
            },
            code => Self::Key {
                modifiers: event.modifiers,
                code,
            },
        }
    }

    /// Get the modifiers of this binding.
    pub fn modifiers(&self) -> KeyModifiers {
        match self {
            Self::Key { modifiers, .. } | Self::Char { modifiers, .. } => *modifiers,
        }
    }

    /// Get the key code this binding matches.
    pub fn code(&self) -> KeyCode {
        match self {
            Self::Key { code, .. } => *code,
            Self::Char { ch, .. } => KeyCode::Char(*ch),
        }
    }

    /// Check if this is a character binding.
    pub fn is_char(&self) -> bool {
        matches!(self, Self::Char { .. })
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match encode(self.modifiers(), self.code()) {
            Ok(label) => f.write_str(&label),
            Err(_) => {
                f.write_str(&modifier_prefix(self.modifiers()))?;
                match self.code() {
                    KeyCode::Char(ch) => write!(f, "{}", ch.escape_default()),
                    code => write!(f, "{code:?}"),
                }
            }
        }
    }
}
