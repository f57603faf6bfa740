//! Demo application state.
//!
//! This module implements The Elm Architecture (TEA) pattern: every terminal
//! event flows through [`App::update`], key presses are dispatched through a
//! [`KeyRegistry`] built from the configured keymap, and the UI renders the
//! resulting state.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tracing::{info, trace};

use crate::bindings::{Actions, KeyRegistry};
use crate::config::{Config, ConfigError, Keymap};
use crate::events::Event;
use crate::keys::{self, Binding};

/// What dispatch did with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No handler changed the event.
    Unchanged,
    /// A handler substituted another event.
    Replaced(KeyEvent),
    /// A handler consumed the event.
    Consumed,
}

/// A dispatched key press and its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchRecord {
    /// The key press as received.
    pub input: KeyEvent,
    /// What dispatch returned for it.
    pub outcome: Outcome,
}

impl DispatchRecord {
    /// Describe this record for display.
    pub fn describe(&self) -> String {
        let input = key_label(&self.input);
        match self.outcome {
            Outcome::Unchanged => format!("{input} passed through"),
            Outcome::Replaced(event) => format!("{input} replaced with {}", key_label(&event)),
            Outcome::Consumed => format!("{input} consumed"),
        }
    }
}

/// The demo application.
pub struct App {
    /// Registry every key press is dispatched through.
    registry: KeyRegistry,
    /// The keymap the registry was built from.
    keymap: Keymap,
    /// Dispatch outcomes, most recent first.
    history: VecDeque<DispatchRecord>,
    /// Maximum number of history entries.
    history_size: usize,
    /// Set by the `quit` action.
    quit_requested: Arc<AtomicBool>,
    /// Toggled by the `help` action.
    show_help: Arc<AtomicBool>,
}

impl App {
    /// Create the application from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the keymap does not bind `quit`, names an unknown
    /// action, or contains an invalid key string.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        if config.keymap.keys_for("quit").is_empty() {
            return Err(ConfigError::ValidationError(
                "the keymap must bind the 'quit' action".to_string(),
            ));
        }

        let quit_requested = Arc::new(AtomicBool::new(false));
        let show_help = Arc::new(AtomicBool::new(config.settings.show_help));

        let registry = KeyRegistry::new();
        let actions = demo_actions(&quit_requested, &show_help);
        let count = config.keymap.apply(&registry, &actions)?;
        info!(
            bindings = count,
            actions = actions.names().len(),
            history_size = config.settings.history_size,
            "Keymap applied"
        );

        Ok(Self {
            registry,
            keymap: config.keymap.clone(),
            history: VecDeque::new(),
            history_size: config.settings.history_size,
            quit_requested,
            show_help,
        })
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {}
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        // KeyEvent equality folds letter case, so compare the raw parts.
        let outcome = match self.registry.capture(Some(key_event)) {
            None => Outcome::Consumed,
            Some(event)
                if (event.code, event.modifiers) == (key_event.code, key_event.modifiers) =>
            {
                Outcome::Unchanged
            }
            Some(event) => Outcome::Replaced(event),
        };

        self.history.push_front(DispatchRecord {
            input: key_event,
            outcome,
        });
        self.history.truncate(self.history_size);

        if self.should_quit() {
            info!("Quit requested");
        }
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.quit_requested.load(Ordering::SeqCst)
    }

    /// Returns whether the bindings panel is visible.
    pub fn show_help(&self) -> bool {
        self.show_help.load(Ordering::SeqCst)
    }

    /// Dispatch history, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &DispatchRecord> {
        self.history.iter()
    }

    /// Get the registry key presses are dispatched through.
    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    /// Canonical key labels bound to an action, joined with `" / "`.
    pub fn keys_for(&self, action: &str) -> String {
        self.keymap
            .keys_for(action)
            .iter()
            .map(|key| canonical_label(key))
            .collect::<Vec<_>>()
            .join(" / ")
    }

    /// Rows for the bindings panel: (keys, action), ordered by action.
    pub fn binding_rows(&self) -> Vec<(String, String)> {
        self.keymap
            .entries()
            .filter(|(_, keys)| !keys.is_empty())
            .map(|(action, _)| (self.keys_for(action), action.to_string()))
            .collect()
    }

    /// Hint line for the help bar, with keys in brackets.
    pub fn hints(&self) -> String {
        [
            ("quit", "quit"),
            ("help", "bindings"),
            ("swallow", "drop key"),
            ("shout", "uppercase"),
        ]
        .iter()
        .filter_map(|(action, label)| {
            let keys = self.keys_for(action);
            (!keys.is_empty()).then(|| format!("[{keys}] {label}"))
        })
        .collect::<Vec<_>>()
        .join("  ")
    }
}

/// Build the actions the demo keymap can refer to.
fn demo_actions(quit_requested: &Arc<AtomicBool>, show_help: &Arc<AtomicBool>) -> Actions {
    let quit_requested = Arc::clone(quit_requested);
    let show_help = Arc::clone(show_help);

    Actions::new()
        .with("quit", move |_| {
            quit_requested.store(true, Ordering::SeqCst);
            None
        })
        .with("help", move |_| {
            show_help.fetch_xor(true, Ordering::SeqCst);
            None
        })
        .with("swallow", |_| None)
        .with("shout", |event: KeyEvent| match event.code {
            KeyCode::Char(c) => {
                let upper = c.to_uppercase().next().unwrap_or(c);
                Some(KeyEvent::new(KeyCode::Char(upper), event.modifiers))
            }
            _ => Some(event),
        })
}

fn key_label(event: &KeyEvent) -> String {
    Binding::from_event(event).to_string()
}

fn canonical_label(key: &str) -> String {
    match keys::decode(key) {
        Ok((modifiers, code)) => Binding::new(modifiers, code).to_string(),
        Err(_) => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn create_test_app() -> App {
        App::new(&Config::default()).unwrap()
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.update(Event::Key(KeyEvent::new(code, modifiers)));
    }

    fn last_outcome(app: &App) -> Outcome {
        app.history().next().unwrap().outcome
    }

    #[test]
    fn test_app_new() {
        let app = create_test_app();
        assert!(!app.should_quit());
        assert!(app.show_help());
        assert_eq!(app.history().count(), 0);
        assert_eq!(app.registry().len(), 7);
    }

    #[test]
    fn test_app_requires_quit_binding() {
        let mut config = Config::default();
        config.keymap.bind("quit", Vec::<String>::new());

        let result = App::new(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_app_rejects_unknown_action() {
        let mut config = Config::default();
        config.keymap.bind("launch", ["l"]);

        let result = App::new(&config);
        assert!(matches!(result, Err(ConfigError::UnknownAction(_))));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert!(app.should_quit());
        assert_eq!(last_outcome(&app), Outcome::Consumed);
    }

    #[test]
    fn test_q_quits() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(app.should_quit());
    }

    #[test]
    fn test_unbound_key_passes_through() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);

        assert!(!app.should_quit());
        assert_eq!(last_outcome(&app), Outcome::Unchanged);
    }

    fn replaced_parts(outcome: Outcome) -> Option<(KeyCode, KeyModifiers)> {
        match outcome {
            Outcome::Replaced(event) => Some((event.code, event.modifiers)),
            _ => None,
        }
    }

    #[test]
    fn test_shout_replaces_key() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('s'), KeyModifiers::ALT);

        assert_eq!(
            replaced_parts(last_outcome(&app)),
            Some((KeyCode::Char('S'), KeyModifiers::ALT))
        );
    }

    #[test]
    fn test_shifted_shout_is_recorded_as_replaced() {
        let mut config = Config::default();
        config.keymap.bind("shout", ["Shift+s"]);
        let mut app = App::new(&config).unwrap();

        press(&mut app, KeyCode::Char('s'), KeyModifiers::SHIFT);

        assert_eq!(
            replaced_parts(last_outcome(&app)),
            Some((KeyCode::Char('S'), KeyModifiers::SHIFT))
        );
        assert_eq!(
            app.history().next().unwrap().describe(),
            "Shift+s replaced with Shift+S"
        );
    }

    #[test]
    fn test_huge_history_size_does_not_preallocate() {
        let mut config = Config::default();
        config.settings.history_size = usize::MAX;
        assert!(config.validate().is_ok());

        let mut app = App::new(&config).unwrap();
        press(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(app.history().count(), 1);
    }

    #[test]
    fn test_escape_is_swallowed() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);

        assert_eq!(last_outcome(&app), Outcome::Consumed);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_help_toggles() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('?'), KeyModifiers::NONE);
        assert!(!app.show_help());

        press(&mut app, KeyCode::F(1), KeyModifiers::NONE);
        assert!(app.show_help());
    }

    #[test]
    fn test_history_bounded_and_most_recent_first() {
        let mut config = Config::default();
        config.settings.history_size = 3;
        let mut app = App::new(&config).unwrap();

        for ch in ['a', 'b', 'c', 'd', 'e'] {
            press(&mut app, KeyCode::Char(ch), KeyModifiers::NONE);
        }

        let inputs: Vec<KeyCode> = app.history().map(|record| record.input.code).collect();
        assert_eq!(
            inputs,
            vec![KeyCode::Char('e'), KeyCode::Char('d'), KeyCode::Char('c')]
        );
    }

    #[test]
    fn test_tick_and_resize_do_not_record() {
        let mut app = create_test_app();
        app.update(Event::Tick);
        app.update(Event::Resize(120, 40));
        assert_eq!(app.history().count(), 0);
    }

    #[test]
    fn test_describe_records() {
        let input = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        let replaced = DispatchRecord {
            input,
            outcome: Outcome::Replaced(KeyEvent::new(KeyCode::Char('S'), KeyModifiers::NONE)),
        };
        assert_eq!(replaced.describe(), "s replaced with S");

        let consumed = DispatchRecord {
            input: KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            outcome: Outcome::Consumed,
        };
        assert_eq!(consumed.describe(), "Esc consumed");
    }

    #[test]
    fn test_keys_for_uses_canonical_labels() {
        let mut config = Config::default();
        config.keymap.bind("quit", ["ctrl+q", "escape"]);
        let app = App::new(&config).unwrap();

        assert_eq!(app.keys_for("quit"), "Ctrl+q / Esc");
        assert_eq!(app.keys_for("missing"), "");
    }

    #[test]
    fn test_binding_rows() {
        let app = create_test_app();
        let rows = app.binding_rows();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], ("? / F1".to_string(), "help".to_string()));
        assert!(rows.contains(&("Ctrl+c / q".to_string(), "quit".to_string())));
    }

    #[test]
    fn test_hints() {
        let app = create_test_app();
        let hints = app.hints();

        assert!(hints.starts_with("[Ctrl+c / q] quit"));
        assert!(hints.contains("[Esc] drop key"));
    }
}
