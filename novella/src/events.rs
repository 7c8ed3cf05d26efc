//! Terminal event mapping.
//!
//! Raw crossterm events become the engine's `InputEvent`s here; everything
//! the state machine doesn't care about maps to `None`.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use novella_core::InputEvent;

/// Map a terminal event to an engine input event.
pub fn map_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<InputEvent> {
    // Ctrl-C is the terminal's window-close
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputEvent::Quit);
    }

    match key.code {
        KeyCode::Up => Some(InputEvent::Up),
        KeyCode::Down => Some(InputEvent::Down),
        KeyCode::Enter => Some(InputEvent::Confirm),
        KeyCode::Esc => Some(InputEvent::Cancel),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(InputEvent::Save),
        _ => None,
    }
}
