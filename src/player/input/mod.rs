//! Input handling for the player.
//!
//! Terminal key events are normalized into the page-style key identifiers
//! the binding table uses (`"k"`, `"N"`, `"ArrowLeft"`), and pointer moves
//! are turned into hover enter/leave transitions over preview entries.

mod keyboard;
mod mouse;

pub use keyboard::{
    Action, ActionParseError, Dispatch, KeyBindingTable, KeyDispatcher, KeyPress,
    PreDispatchHook, SuppressDefaults, DEFAULT_SUPPRESSED, DEFAULT_VOLUME_STEP,
};
pub use mouse::{HoverChange, HoverTracker, Region};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Normalize a terminal key event into a key identifier.
///
/// Shifted letters arrive as upper-case characters, so `"n"` and `"N"`
/// stay distinct. Releases and Ctrl/Alt chords do not normalize.
pub fn normalize_key(key: &KeyEvent) -> Option<String> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    let name = match key.code {
        KeyCode::Char(c) => return Some(c.to_string()),
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Enter => "Enter",
        KeyCode::Esc => "Escape",
        KeyCode::Tab => "Tab",
        KeyCode::Backspace => "Backspace",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Delete => "Delete",
        _ => return None,
    };
    Some(name.to_string())
}

/// Build a `KeyPress` from a terminal key event.
pub fn key_press(key: &KeyEvent) -> Option<KeyPress> {
    normalize_key(key).map(KeyPress::new)
}
