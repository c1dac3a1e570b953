//! Core model implementation for the textinput component.

use super::keymap::{default_key_map, KeyMap};
use crate::autocomplete::Point;
use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
use lipgloss_extras::prelude::*;

/// A single-line text input.
///
/// The model keeps its value as a vector of `char`s so that the cursor
/// position is always a character index. It knows where it is drawn on the
/// terminal (see [`Model::set_origin`]) so that a popup can be anchored
/// below it.
///
/// # Examples
///
/// ```rust
/// use bubbletea_autocomplete::textinput::new;
///
/// let mut input = new();
/// input.focus();
/// input.set_placeholder("Search...");
/// input.set_width(30);
/// input.set_value("hello");
/// assert_eq!(input.position(), 5);
/// ```
pub struct Model {
    /// Prompt is the prompt to display before the text input.
    pub prompt: String,
    /// Style for the prompt prefix.
    pub prompt_style: Style,
    /// Style of the text as it's being typed.
    pub text_style: Style,
    /// Placeholder text shown while the input is empty.
    pub placeholder: String,
    /// Style for the placeholder text.
    pub placeholder_style: Style,
    /// Style of the character under the cursor.
    pub cursor_style: Style,
    /// KeyMap encodes the keybindings.
    pub key_map: KeyMap,

    /// Maximum number of characters accepted; 0 means no limit.
    pub(super) char_limit: usize,
    pub(super) value: Vec<char>,
    pub(super) focus: bool,
    pub(super) pos: usize,
    /// Visible width in cells, excluding the prompt. 0 grows with the value.
    pub(super) width: i32,
    /// First visible character when the value is wider than `width`.
    pub(super) offset: usize,
    /// Top-left cell of the input relative to the terminal window.
    pub(super) origin: Point,
    /// Position of the terminal window on the screen.
    pub(super) window_origin: Point,
}

/// Creates a new, unfocused text input with the default prompt `"> "`.
pub fn new() -> Model {
    Model {
        prompt: "> ".to_string(),
        prompt_style: Style::new(),
        text_style: Style::new(),
        placeholder: String::new(),
        placeholder_style: Style::new().foreground(Color::from("240")),
        cursor_style: Style::new().reverse(true),
        key_map: default_key_map(),
        char_limit: 0,
        value: Vec::new(),
        focus: false,
        pos: 0,
        width: 0,
        offset: 0,
        origin: Point::default(),
        window_origin: Point::default(),
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("value", &self.value())
            .field("pos", &self.pos)
            .field("focus", &self.focus)
            .field("width", &self.width)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
