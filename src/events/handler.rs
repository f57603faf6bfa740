//! Event handler implementation.
//!
//! Polls for terminal events and converts them to application events.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};

use super::Event;
use crate::config::DEFAULT_TICK_RATE_MS;

/// Handles application events by polling crossterm for terminal events.
pub struct EventHandler {
    /// The tick rate duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the default tick rate.
    pub fn new() -> Self {
        Self::with_tick_rate(DEFAULT_TICK_RATE_MS)
    }

    /// Create a new event handler with a custom tick rate.
    pub fn with_tick_rate(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Get the tick rate.
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Poll for the next event.
    ///
    /// This method blocks until an event is available or the tick rate elapses.
    /// Returns `Event::Tick` if no event occurred within the tick rate.
    pub fn next(&self) -> std::io::Result<Event> {
        if event::poll(self.tick_rate)? {
            Ok(convert(event::read()?))
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a terminal event to an application event.
///
/// Only key presses are forwarded. Terminals with enhanced keyboard
/// reporting also send repeat and release events, which would otherwise
/// dispatch a binding more than once per keystroke.
fn convert(event: CrosstermEvent) -> Event {
    match event {
        CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            Event::Key(key_event)
        }
        CrosstermEvent::Key(_) => Event::Tick,
        CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
        // Mouse, focus and paste events are not dispatched
        CrosstermEvent::Mouse(_)
        | CrosstermEvent::FocusGained
        | CrosstermEvent::FocusLost
        | CrosstermEvent::Paste(_) => Event::Tick,
    }
}
