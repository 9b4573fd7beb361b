//! Key bindings.
//!
//! The plugin shim converts host key events into [`Key`] and asks
//! [`map_key`] for the matching [`Event`]. Keeping the table here, outside the
//! wasm-only shim, lets the bindings be tested natively.

use super::handler::Event;
use super::modes::{InputMode, Panel, SearchFocus};
use crate::catalog::ViewMode;

/// A key press, independent of the host's key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
}

/// Maps a key press to an event for the current mode and panel.
///
/// Returns `None` for keys that mean nothing in this context.
#[must_use]
pub fn map_key(input_mode: &InputMode, panel: Panel, key: Key) -> Option<Event> {
    if input_mode.captures_text() {
        return map_text_key(input_mode, key);
    }

    if let Some(event) = map_navigation_key(key) {
        return Some(event);
    }

    if matches!(input_mode, InputMode::Search(SearchFocus::Navigating)) {
        match key {
            Key::Char('/') => return Some(Event::SearchMode),
            Key::Tab => return Some(Event::Tab),
            _ => {}
        }
    }

    let event = match (panel, key) {
        (_, Key::Char('q')) => Event::CloseFocus,
        (_, Key::Esc) => Event::Escape,
        (_, Key::Char('f')) => Event::ToggleFavorite,
        (_, Key::Char('F')) => Event::ShowFavorites,
        (_, Key::Char('l')) => Event::LoginPrompt,
        (_, Key::Char('L')) => Event::Logout,
        (_, Key::Char('r')) => Event::Reload,

        (Panel::Catalog, Key::Char('/')) => Event::SearchMode,
        (Panel::Catalog, Key::Char('p')) => Event::ShowView(ViewMode::Popular),
        (Panel::Catalog, Key::Char('a')) => Event::ShowView(ViewMode::AToZ),
        (Panel::Catalog, Key::Char('z')) => Event::ShowView(ViewMode::ZToA),
        (Panel::Catalog, Key::Char('P')) => Event::ShowView(ViewMode::People),
        (Panel::Catalog, Key::Char('s')) => Event::ShowView(ViewMode::Company),
        (Panel::Catalog, Key::Char('y')) => Event::YearPrompt,
        (Panel::Catalog, Key::Char('g')) => Event::GenrePicker,
        (Panel::Catalog, Key::Char('x')) => Event::ClearFilters,
        (Panel::Catalog, Key::Char(']') | Key::Right) => Event::NextPage,
        (Panel::Catalog, Key::Char('[') | Key::Left) => Event::PrevPage,

        (Panel::Favorites, Key::Char('o')) => Event::CycleFavoritesSort,
        (Panel::Favorites, Key::Char('O')) => Event::ReverseFavoritesSort,

        _ => return None,
    };
    Some(event)
}

fn map_navigation_key(key: Key) -> Option<Event> {
    match key {
        Key::Down | Key::Char('j') | Key::Ctrl('n') => Some(Event::KeyDown),
        Key::Up | Key::Char('k') | Key::Ctrl('p') => Some(Event::KeyUp),
        Key::Enter => Some(Event::Select),
        _ => None,
    }
}

fn map_text_key(input_mode: &InputMode, key: Key) -> Option<Event> {
    match key {
        Key::Enter => Some(Event::Select),
        Key::Esc => Some(Event::Escape),
        Key::Backspace => Some(Event::Backspace),
        Key::Tab => Some(Event::Tab),
        Key::Down | Key::Ctrl('n') => Some(Event::KeyDown),
        Key::Up | Key::Ctrl('p') => Some(Event::KeyUp),
        Key::Ctrl('s') if matches!(input_mode, InputMode::Login(_)) => Some(Event::ToggleSignUp),
        Key::Char(c) => Some(Event::Char(c)),
        _ => None,
    }
}
