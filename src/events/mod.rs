//! Event handling for the application.
//!
//! This module polls the terminal and turns its events into application
//! events. Key presses are what the binding registry dispatches.

mod handler;

pub use handler::EventHandler;

use crossterm::event::KeyEvent;

/// Application events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No event arrived within the tick rate.
    Tick,
}
