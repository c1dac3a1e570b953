//! Key bindings for the textinput component.

use crate::key::{Binding, KeyPress};
use crossterm::event::{KeyCode, KeyModifiers};

/// Editing and movement bindings of the text input.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Move cursor one character right.
    pub character_forward: Binding,
    /// Move cursor one character left.
    pub character_backward: Binding,
    /// Move cursor one word right.
    pub word_forward: Binding,
    /// Move cursor one word left.
    pub word_backward: Binding,
    /// Delete the previous word.
    pub delete_word_backward: Binding,
    /// Delete from cursor to end of line.
    pub delete_after_cursor: Binding,
    /// Delete from start of line to cursor.
    pub delete_before_cursor: Binding,
    /// Delete one character backward.
    pub delete_character_backward: Binding,
    /// Delete one character forward.
    pub delete_character_forward: Binding,
    /// Move to start of line.
    pub line_start: Binding,
    /// Move to end of line.
    pub line_end: Binding,
}

const NONE: KeyModifiers = KeyModifiers::NONE;
const CTRL: KeyModifiers = KeyModifiers::CONTROL;
const ALT: KeyModifiers = KeyModifiers::ALT;

fn binding(keys: &[(KeyCode, KeyModifiers)]) -> Binding {
    Binding::new(keys.iter().map(|&(code, mods)| KeyPress::new(code, mods)))
}

/// The default bindings: arrows, home/end and the usual readline chords.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        character_forward: binding(&[(KeyCode::Right, NONE), (KeyCode::Char('f'), CTRL)]),
        character_backward: binding(&[(KeyCode::Left, NONE), (KeyCode::Char('b'), CTRL)]),
        word_forward: binding(&[
            (KeyCode::Right, ALT),
            (KeyCode::Right, CTRL),
            (KeyCode::Char('f'), ALT),
        ]),
        word_backward: binding(&[
            (KeyCode::Left, ALT),
            (KeyCode::Left, CTRL),
            (KeyCode::Char('b'), ALT),
        ]),
        delete_word_backward: binding(&[(KeyCode::Backspace, ALT), (KeyCode::Char('w'), CTRL)]),
        delete_after_cursor: binding(&[(KeyCode::Char('k'), CTRL)]),
        delete_before_cursor: binding(&[(KeyCode::Char('u'), CTRL)]),
        delete_character_backward: binding(&[
            (KeyCode::Backspace, NONE),
            (KeyCode::Char('h'), CTRL),
        ]),
        delete_character_forward: binding(&[(KeyCode::Delete, NONE), (KeyCode::Char('d'), CTRL)]),
        line_start: binding(&[(KeyCode::Home, NONE), (KeyCode::Char('a'), CTRL)]),
        line_end: binding(&[(KeyCode::End, NONE), (KeyCode::Char('e'), CTRL)]),
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}
