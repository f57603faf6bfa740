//! Key string parsing and formatting.
//!
//! Key strings name a key together with its modifiers, e.g. `Ctrl+Alt+x`,
//! `Shift+Tab` or `F5`. Tokens are separated by `+`, modifiers come first
//! and the key comes last. A trailing empty token stands for the `+` key
//! itself, so `Ctrl++` is Ctrl held with plus.
//!
//! Modifier and named-key tokens are case-insensitive. Single characters
//! keep their case: `Shift+A` and `Shift+a` are different bindings, which
//! matters because terminals differ in how they report shifted letters.

use crossterm::event::{KeyCode, KeyModifiers};

use super::error::{KeyError, Result};

/// Modifier labels in the order [`encode`] writes them.
const MODIFIER_LABELS: [(KeyModifiers, &str); 6] = [
    (KeyModifiers::CONTROL, "Ctrl"),
    (KeyModifiers::ALT, "Alt"),
    (KeyModifiers::META, "Meta"),
    (KeyModifiers::SUPER, "Super"),
    (KeyModifiers::HYPER, "Hyper"),
    (KeyModifiers::SHIFT, "Shift"),
];

/// Highest function key a key string can name.
const MAX_FUNCTION_KEY: u8 = 24;

/// Parse a key string into its modifiers and key code.
///
/// # Errors
///
/// Returns `KeyError::Empty` for blank input, `KeyError::UnknownModifier`
/// for an unrecognized modifier token and `KeyError::UnknownKey` when the
/// final token is neither a named key nor a single character.
pub fn decode(s: &str) -> Result<(KeyModifiers, KeyCode)> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(KeyError::Empty);
    }

    let mut tokens: Vec<&str> = trimmed.split('+').map(str::trim).collect();

    // "Ctrl++" splits into ["Ctrl", "", ""] and "+" into ["", ""]
    let key_token = match tokens.pop() {
        Some("") if tokens.last() == Some(&"") => {
            tokens.pop();
            "+"
        }
        Some("") | None => return Err(KeyError::UnknownKey(trimmed.to_string())),
        Some(token) => token,
    };

    let mut modifiers = KeyModifiers::NONE;
    for token in tokens {
        modifiers |= parse_modifier(token)?;
    }

    Ok((modifiers, parse_key(key_token)?))
}

/// Format modifiers and a key code as a canonical key string.
///
/// Modifiers are written in a fixed order (`Ctrl+Alt+Meta+Super+Hyper+Shift`)
/// so equal bindings always produce equal strings.
///
/// # Errors
///
/// Returns `KeyError::Unencodable` for key codes with no string form, such
/// as `KeyCode::Null`, media keys or control characters.
pub fn encode(modifiers: KeyModifiers, code: KeyCode) -> Result<String> {
    let key = key_label(code)?;

    let mut label = modifier_prefix(modifiers);
    label.push_str(&key);

    Ok(label)
}

/// Modifier names in canonical order, each followed by `+`.
pub(super) fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut prefix = String::new();
    for (flag, name) in MODIFIER_LABELS {
        if modifiers.contains(flag) {
            prefix.push_str(name);
            prefix.push('+');
        }
    }
    prefix
}

fn parse_modifier(token: &str) -> Result<KeyModifiers> {
    match token.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Ok(KeyModifiers::CONTROL),
        "alt" | "option" => Ok(KeyModifiers::ALT),
        "shift" => Ok(KeyModifiers::SHIFT),
        "meta" => Ok(KeyModifiers::META),
        "super" | "cmd" => Ok(KeyModifiers::SUPER),
        "hyper" => Ok(KeyModifiers::HYPER),
        _ => Err(KeyError::UnknownModifier(token.to_string())),
    }
}

fn parse_key(token: &str) -> Result<KeyCode> {
    let named = match token.to_ascii_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "esc" | "escape" => Some(KeyCode::Esc),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        "insert" | "ins" => Some(KeyCode::Insert),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Ok(code);
    }

    let mut chars = token.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(ch));
    }

    if let Some(number) = token.strip_prefix(['f', 'F']) {
        if let Ok(n) = number.parse::<u8>() {
            if (1..=MAX_FUNCTION_KEY).contains(&n) {
                return Ok(KeyCode::F(n));
            }
        }
    }

    Err(KeyError::UnknownKey(token.to_string()))
}

fn key_label(code: KeyCode) -> Result<String> {
    let label = match code {
        KeyCode::Enter => "Enter",
        KeyCode::Tab => "Tab",
        KeyCode::BackTab => "BackTab",
        KeyCode::Esc => "Esc",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PgUp",
        KeyCode::PageDown => "PgDn",
        KeyCode::Up => "Up",
        KeyCode::Down => "Down",
        KeyCode::Left => "Left",
        KeyCode::Right => "Right",
        KeyCode::Char(' ') => "Space",
        KeyCode::F(n) if (1..=MAX_FUNCTION_KEY).contains(&n) => return Ok(format!("F{n}")),
        KeyCode::Char(ch) if !ch.is_control() => return Ok(ch.to_string()),
        other => return Err(KeyError::Unencodable(format!("{other:?}"))),
    };
    Ok(label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_character() {
        assert_eq!(
            decode("q").unwrap(),
            (KeyModifiers::NONE, KeyCode::Char('q'))
        );
    }

    #[test]
    fn test_decode_preserves_character_case() {
        assert_eq!(
            decode("Shift+A").unwrap(),
            (KeyModifiers::SHIFT, KeyCode::Char('A'))
        );
        assert_eq!(
            decode("shift+a").unwrap(),
            (KeyModifiers::SHIFT, KeyCode::Char('a'))
        );
    }

    #[test]
    fn test_decode_modifiers_case_insensitive() {
        let expected = (
            KeyModifiers::CONTROL | KeyModifiers::ALT,
            KeyCode::Char('x'),
        );
        assert_eq!(decode("Ctrl+Alt+x").unwrap(), expected);
        assert_eq!(decode("CONTROL+option+x").unwrap(), expected);
        assert_eq!(decode("alt+ctrl+x").unwrap(), expected);
    }

    #[test]
    fn test_decode_named_keys() {
        assert_eq!(decode("Enter").unwrap().1, KeyCode::Enter);
        assert_eq!(decode("return").unwrap().1, KeyCode::Enter);
        assert_eq!(decode("ESC").unwrap().1, KeyCode::Esc);
        assert_eq!(decode("pgdn").unwrap().1, KeyCode::PageDown);
        assert_eq!(decode("Space").unwrap().1, KeyCode::Char(' '));
        assert_eq!(
            decode("Shift+Tab").unwrap(),
            (KeyModifiers::SHIFT, KeyCode::Tab)
        );
    }

    #[test]
    fn test_decode_function_keys() {
        assert_eq!(decode("F1").unwrap().1, KeyCode::F(1));
        assert_eq!(decode("f24").unwrap().1, KeyCode::F(24));
        assert!(matches!(decode("F0"), Err(KeyError::UnknownKey(_))));
        assert!(matches!(decode("F25"), Err(KeyError::UnknownKey(_))));
    }

    #[test]
    fn test_decode_plus_key() {
        assert_eq!(
            decode("+").unwrap(),
            (KeyModifiers::NONE, KeyCode::Char('+'))
        );
        assert_eq!(
            decode("Ctrl++").unwrap(),
            (KeyModifiers::CONTROL, KeyCode::Char('+'))
        );
    }

    #[test]
    fn test_decode_tolerates_whitespace() {
        assert_eq!(
            decode("  Ctrl + s ").unwrap(),
            (KeyModifiers::CONTROL, KeyCode::Char('s'))
        );
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode(""), Err(KeyError::Empty));
        assert_eq!(decode("   "), Err(KeyError::Empty));
        assert_eq!(
            decode("Hold+x"),
            Err(KeyError::UnknownModifier("Hold".to_string()))
        );
        assert_eq!(
            decode("Ctrl+nope"),
            Err(KeyError::UnknownKey("nope".to_string()))
        );
        assert!(matches!(decode("Ctrl+"), Err(KeyError::UnknownKey(_))));
    }

    #[test]
    fn test_encode_orders_modifiers() {
        let modifiers = KeyModifiers::SHIFT | KeyModifiers::ALT | KeyModifiers::CONTROL;
        assert_eq!(
            encode(modifiers, KeyCode::Left).unwrap(),
            "Ctrl+Alt+Shift+Left"
        );
    }

    #[test]
    fn test_encode_named_and_special_keys() {
        assert_eq!(encode(KeyModifiers::NONE, KeyCode::PageUp).unwrap(), "PgUp");
        assert_eq!(encode(KeyModifiers::NONE, KeyCode::F(5)).unwrap(), "F5");
        assert_eq!(
            encode(KeyModifiers::NONE, KeyCode::Char(' ')).unwrap(),
            "Space"
        );
        assert_eq!(
            encode(KeyModifiers::CONTROL, KeyCode::Char('+')).unwrap(),
            "Ctrl++"
        );
    }

    #[test]
    fn test_encode_unencodable() {
        assert!(matches!(
            encode(KeyModifiers::NONE, KeyCode::Null),
            Err(KeyError::Unencodable(_))
        ));
        assert!(matches!(
            encode(KeyModifiers::NONE, KeyCode::Char('\u{7}')),
            Err(KeyError::Unencodable(_))
        ));
        assert!(matches!(
            encode(KeyModifiers::NONE, KeyCode::F(0)),
            Err(KeyError::Unencodable(_))
        ));
    }

    #[test]
    fn test_encode_output_decodes_to_same_key() {
        let keys = [
            (KeyModifiers::CONTROL, KeyCode::Char('+')),
            (KeyModifiers::SHIFT, KeyCode::BackTab),
            (KeyModifiers::ALT | KeyModifiers::META, KeyCode::F(12)),
            (KeyModifiers::NONE, KeyCode::Char(' ')),
        ];
        for (modifiers, code) in keys {
            let label = encode(modifiers, code).unwrap();
            assert_eq!(decode(&label).unwrap(), (modifiers, code), "{label}");
        }
    }
}
