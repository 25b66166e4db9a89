//! Terminal input for the orbit view.
//!
//! Rotation ticks come from the engine's rotator, not from here; this module
//! only turns crossterm input into [`Event`]s and keys into [`Action`]s.

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// How long the input thread waits before checking whether anyone still listens.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Reads terminal input on a background thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // crossterm input is blocking, so it gets its own thread.
        std::thread::spawn(move || {
            while !tx.is_closed() {
                if !event::poll(POLL_INTERVAL).unwrap_or(false) {
                    continue;
                }
                let Ok(evt) = event::read() else {
                    continue;
                };
                let event = match evt {
                    CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                        Event::Key(key)
                    }
                    CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
                    CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
                    _ => continue,
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
            debug!("input thread stopped");
        });

        Self { rx }
    }

    /// Next input event; `None` once the input thread is gone.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    /// Collapse the expanded item, or close help.
    Back,
    /// Toggle the item under the cursor.
    Select,
    Next,
    Prev,
    /// Toggle the item at this position in the ring.
    Item(usize),
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::Help,
        KeyCode::Esc => Action::Back,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Select,
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Action::Prev,
        KeyCode::BackTab => Action::Prev,
        KeyCode::Tab
        | KeyCode::Right
        | KeyCode::Down
        | KeyCode::Char('l' | 'j') => Action::Next,
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h' | 'k') => Action::Prev,
        KeyCode::Char(c @ '1'..='9') => {
            Action::Item(c.to_digit(10).map_or(0, |d| d as usize - 1))
        }
        _ => Action::None,
    }
}
