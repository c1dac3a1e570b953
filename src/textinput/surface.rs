//! The text input as an autocomplete anchor.

use super::model::Model;
use crate::autocomplete::{Point, Rect, TextSurface};
use unicode_width::UnicodeWidthStr;

impl Model {
    /// Width of the rendered input in cells, prompt included.
    pub fn display_width(&self) -> i32 {
        let prompt = self.prompt.width() as i32;
        let body = if self.width > 0 {
            self.width
        } else {
            self.value.len().max(self.placeholder.chars().count()) as i32 + 1
        };
        prompt + body
    }
}

impl TextSurface for Model {
    fn text(&self) -> String {
        self.value()
    }

    fn set_text(&mut self, text: &str) {
        self.set_value(text);
    }

    fn caret(&self) -> usize {
        self.position()
    }

    fn set_caret(&mut self, pos: usize) {
        self.set_cursor(pos);
    }

    fn focus(&mut self) {
        Model::focus(self);
    }

    fn has_focus(&self) -> bool {
        self.focused()
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.display_width(), 1)
    }

    fn window_origin(&self) -> Point {
        self.window_origin
    }
}
