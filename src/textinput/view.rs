//! View rendering for the textinput component.

use super::model::Model;

impl Model {
    /// Renders the prompt, the visible part of the value and, while focused,
    /// the cursor.
    pub fn view(&self) -> String {
        if self.value.is_empty() && !self.placeholder.is_empty() {
            return self.placeholder_view();
        }

        let width = self.width as usize;
        let end = if width == 0 {
            self.value.len()
        } else {
            (self.offset + width).min(self.value.len())
        };
        let visible = &self.value[self.offset..end];
        let pos = self.pos.saturating_sub(self.offset);

        let mut v = String::new();
        let before: String = visible[..pos.min(visible.len())].iter().collect();
        v.push_str(&self.text_style.render(&before));

        let mut used = visible.len();
        if pos < visible.len() {
            let under = visible[pos].to_string();
            v.push_str(&self.render_cursor(&under));
            let after: String = visible[pos + 1..].iter().collect();
            v.push_str(&self.text_style.render(&after));
        } else if self.focus {
            v.push_str(&self.render_cursor(" "));
            used += 1;
        }

        if width > used {
            v.push_str(&self.text_style.render(&" ".repeat(width - used)));
        }

        format!("{}{}", self.prompt_style.render(&self.prompt), v)
    }

    fn render_cursor(&self, under: &str) -> String {
        if self.focus {
            self.cursor_style.render(under)
        } else {
            self.text_style.render(under)
        }
    }

    fn placeholder_view(&self) -> String {
        let mut chars = self.placeholder.chars();
        let mut v = String::new();
        if self.focus {
            if let Some(first) = chars.next() {
                v.push_str(&self.cursor_style.render(&first.to_string()));
            }
        }
        let rest: String = chars.collect();
        v.push_str(&self.placeholder_style.render(&rest));

        let shown = self.placeholder.chars().count();
        let width = self.width as usize;
        if width > shown {
            v.push_str(&" ".repeat(width - shown));
        }
        format!("{}{}", self.prompt_style.render(&self.prompt), v)
    }
}
