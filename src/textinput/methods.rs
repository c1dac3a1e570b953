//! Editing methods of the text input.

use super::model::Model;
use crate::autocomplete::Point;
use crate::key::KeyPress;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};

impl Model {
    /// Sets the value of the text input.
    ///
    /// The cursor keeps its position when it still fits; otherwise it moves
    /// to the end.
    ///
    /// ```rust
    /// use bubbletea_autocomplete::textinput::new;
    ///
    /// let mut input = new();
    /// input.set_value("Hello, world!");
    /// assert_eq!(input.value(), "Hello, world!");
    /// ```
    pub fn set_value(&mut self, s: &str) {
        let was_empty = self.value.is_empty();
        self.value = s.chars().collect();
        if self.char_limit > 0 {
            self.value.truncate(self.char_limit);
        }
        if (self.pos == 0 && was_empty) || self.pos > self.value.len() {
            self.pos = self.value.len();
        }
        self.handle_overflow();
    }

    /// Returns the current value of the text input.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Returns the cursor position as a character index.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor, clamped to the end of the value.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
        self.handle_overflow();
    }

    /// Moves the cursor to the beginning of the input field.
    pub fn cursor_start(&mut self) {
        self.set_cursor(0);
    }

    /// Moves the cursor to the end of the input field.
    pub fn cursor_end(&mut self) {
        self.set_cursor(self.value.len());
    }

    /// Returns whether the text input currently has focus.
    pub fn focused(&self) -> bool {
        self.focus
    }

    /// Gives the input keyboard focus.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Removes keyboard focus.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Clears the value and moves the cursor to the start.
    pub fn reset(&mut self) {
        self.value.clear();
        self.set_cursor(0);
    }

    /// Sets the placeholder text displayed when the input is empty.
    pub fn set_placeholder(&mut self, placeholder: &str) {
        self.placeholder = placeholder.to_string();
    }

    /// Sets the visible width in cells, not counting the prompt. 0 lets the
    /// input grow with its value.
    pub fn set_width(&mut self, width: i32) {
        self.width = width.max(0);
        self.handle_overflow();
    }

    /// Returns the visible width, not counting the prompt.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Sets the maximum number of characters accepted. 0 removes the limit.
    pub fn set_char_limit(&mut self, limit: usize) {
        self.char_limit = limit;
        if limit > 0 && self.value.len() > limit {
            self.value.truncate(limit);
            self.set_cursor(self.pos);
        }
    }

    /// Places the input at `origin`, relative to the terminal window.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Where the input is drawn, relative to the terminal window.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Sets the position of the terminal window on the screen.
    pub fn set_window_origin(&mut self, origin: Point) {
        self.window_origin = origin;
    }

    /// Processes a key message. Unfocused inputs ignore everything.
    ///
    /// ```rust
    /// use bubbletea_autocomplete::textinput::new;
    /// use bubbletea_rs::KeyMsg;
    /// use crossterm::event::{KeyCode, KeyModifiers};
    ///
    /// let mut input = new();
    /// input.focus();
    /// input.update(Box::new(KeyMsg {
    ///     key: KeyCode::Char('h'),
    ///     modifiers: KeyModifiers::NONE,
    /// }));
    /// assert_eq!(input.value(), "h");
    /// ```
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if !self.focus {
            return None;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            self.handle_key(&KeyPress::from(key_msg));
        }
        None
    }

    /// Applies one key press. Returns `true` when the key was an editing or
    /// movement key or inserted a character.
    pub fn handle_key(&mut self, key: &KeyPress) -> bool {
        let km = &self.key_map;
        if km.delete_word_backward.matches(key) {
            self.delete_word_backward();
        } else if km.delete_character_backward.matches(key) {
            if self.pos > 0 {
                self.value.remove(self.pos - 1);
                self.set_cursor(self.pos - 1);
            }
        } else if km.delete_character_forward.matches(key) {
            if self.pos < self.value.len() {
                self.value.remove(self.pos);
                self.handle_overflow();
            }
        } else if km.delete_after_cursor.matches(key) {
            self.value.truncate(self.pos);
            self.handle_overflow();
        } else if km.delete_before_cursor.matches(key) {
            self.value.drain(..self.pos);
            self.offset = 0;
            self.set_cursor(0);
        } else if km.word_backward.matches(key) {
            self.set_cursor(self.word_start_before(self.pos));
        } else if km.word_forward.matches(key) {
            self.set_cursor(self.word_end_after(self.pos));
        } else if km.character_backward.matches(key) {
            self.set_cursor(self.pos.saturating_sub(1));
        } else if km.character_forward.matches(key) {
            self.set_cursor(self.pos + 1);
        } else if km.line_start.matches(key) {
            self.cursor_start();
        } else if km.line_end.matches(key) {
            self.cursor_end();
        } else {
            return self.insert_from_key(key);
        }
        true
    }

    fn insert_from_key(&mut self, key: &KeyPress) -> bool {
        let KeyCode::Char(ch) = key.code else {
            return false;
        };
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            || ch.is_control()
        {
            return false;
        }
        self.insert_chars([ch]);
        true
    }

    /// Inserts characters at the cursor, respecting the character limit.
    pub fn insert_chars(&mut self, chars: impl IntoIterator<Item = char>) {
        for ch in chars {
            if self.char_limit > 0 && self.value.len() >= self.char_limit {
                break;
            }
            self.value.insert(self.pos, ch);
            self.pos += 1;
        }
        self.handle_overflow();
    }

    fn delete_word_backward(&mut self) {
        let start = self.word_start_before(self.pos);
        self.value.drain(start..self.pos);
        self.set_cursor(start);
    }

    fn word_start_before(&self, pos: usize) -> usize {
        let mut i = pos;
        while i > 0 && self.value[i - 1].is_whitespace() {
            i -= 1;
        }
        while i > 0 && !self.value[i - 1].is_whitespace() {
            i -= 1;
        }
        i
    }

    fn word_end_after(&self, pos: usize) -> usize {
        let mut i = pos;
        while i < self.value.len() && self.value[i].is_whitespace() {
            i += 1;
        }
        while i < self.value.len() && !self.value[i].is_whitespace() {
            i += 1;
        }
        i
    }

    /// Keeps the cursor inside the visible window of `width` cells.
    pub(super) fn handle_overflow(&mut self) {
        let width = self.width as usize;
        // one cell is reserved for the cursor at the end of the value
        if width == 0 || self.value.len() < width {
            self.offset = 0;
            return;
        }
        if self.pos < self.offset {
            self.offset = self.pos;
        } else if self.pos >= self.offset + width {
            self.offset = self.pos + 1 - width;
        }
        self.offset = self.offset.min(self.value.len() + 1 - width);
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        Model::focus(self);
        None
    }

    fn blur(&mut self) {
        Model::blur(self)
    }

    fn focused(&self) -> bool {
        Model::focused(self)
    }
}
