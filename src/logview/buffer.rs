//! Bounded, level-tagged log text.

use super::style::StyleMap;
use tracing::Level;

/// Default maximum length, in characters.
pub const DEFAULT_MAX_LEN: usize = 65536;

/// One appended chunk of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Level the text was logged at; `None` for notices written by the buffer.
    pub level: Option<Level>,
    /// Text without ANSI escapes.
    pub text: String,
}

/// Log text shown by a log view.
///
/// When the text has grown past `max_len` characters, the next append clears
/// it and leaves a notice before the new entry:
///
/// ```rust
/// use bubbletea_autocomplete::logview::LogBuffer;
/// use tracing::Level;
///
/// let mut buffer = LogBuffer::new();
/// buffer.set_max_len(10);
/// buffer.append(Level::INFO, "0123456789ab\n");
/// buffer.append(Level::INFO, "next\n");
/// assert_eq!(
///     buffer.text(),
///     "(earlier messages cleared because log length exceeded maximum of 10)\n\nnext\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct LogBuffer {
    lines: Vec<LogLine>,
    len: usize,
    max_len: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogBuffer {
    /// Creates an empty buffer with the default maximum length.
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            len: 0,
            max_len: DEFAULT_MAX_LEN,
        }
    }

    /// Maximum length before the buffer is cleared.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Sets the maximum length. Zero and negative values are ignored.
    pub fn set_max_len(&mut self, max_len: i64) {
        if max_len <= 0 {
            return;
        }
        self.max_len = usize::try_from(max_len).unwrap_or(usize::MAX);
    }

    /// Current length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Reports whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appended chunks, oldest first.
    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    /// Removes all text.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.len = 0;
    }

    /// Appends `text` logged at `level`. ANSI escape sequences are removed.
    pub fn append(&mut self, level: Level, text: &str) {
        if self.len > self.max_len {
            self.clear();
            let notice = format!(
                "(earlier messages cleared because log length exceeded maximum of {})\n\n",
                self.max_len
            );
            self.push(None, notice);
        }
        self.push(Some(level), strip_ansi_escapes::strip_str(text));
    }

    fn push(&mut self, level: Option<Level>, text: String) {
        self.len += text.chars().count();
        self.lines.push(LogLine { level, text });
    }

    /// The plain text.
    pub fn text(&self) -> String {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    /// The text with each chunk drawn in its level's style.
    pub fn view(&self, styles: &StyleMap) -> String {
        self.lines
            .iter()
            .map(|line| match &line.level {
                Some(level) => render_lines(&styles.resolve(level), &line.text),
                None => line.text.clone(),
            })
            .collect()
    }
}

/// Styles each line separately so that newlines stay outside the escapes.
fn render_lines(style: &lipgloss_extras::prelude::Style, text: &str) -> String {
    text.split_inclusive('\n')
        .map(|line| match line.strip_suffix('\n') {
            Some(body) if body.is_empty() => "\n".to_string(),
            Some(body) => format!("{}\n", style.render(body)),
            None => style.render(line),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logview::style::{LevelStyle, StyleMap};

    #[test]
    fn appends_in_order() {
        let mut buffer = LogBuffer::new();
        buffer.append(Level::INFO, "one\n");
        buffer.append(Level::WARN, "two\n");
        assert_eq!(buffer.text(), "one\ntwo\n");
        assert_eq!(buffer.len(), 8);
        assert_eq!(buffer.lines()[1].level, Some(Level::WARN));
    }

    #[test]
    fn clears_only_after_exceeding_the_maximum() {
        let mut buffer = LogBuffer::new();
        buffer.set_max_len(9);
        buffer.append(Level::INFO, "1234\n");
        buffer.append(Level::INFO, "567\n");
        assert_eq!(buffer.len(), 9);
        // at the maximum, not past it
        buffer.append(Level::INFO, "x\n");
        assert_eq!(buffer.text(), "1234\n567\nx\n");

        buffer.append(Level::ERROR, "y\n");
        assert_eq!(
            buffer.text(),
            "(earlier messages cleared because log length exceeded maximum of 9)\n\ny\n"
        );
        assert_eq!(buffer.lines()[0].level, None);
    }

    #[test]
    fn non_positive_maximum_is_ignored() {
        let mut buffer = LogBuffer::new();
        buffer.set_max_len(0);
        buffer.set_max_len(-5);
        assert_eq!(buffer.max_len(), DEFAULT_MAX_LEN);
        buffer.set_max_len(100);
        assert_eq!(buffer.max_len(), 100);
    }

    #[test]
    fn ansi_escapes_are_stripped() {
        let mut buffer = LogBuffer::new();
        buffer.append(Level::INFO, "\x1b[31mred\x1b[0m text\n");
        assert_eq!(buffer.text(), "red text\n");
    }

    #[test]
    fn view_keeps_text_and_newlines() {
        let mut buffer = LogBuffer::new();
        buffer.append(Level::ERROR, "boom\n\nafter\n");
        let styles = StyleMap::new(vec![LevelStyle::new(Level::ERROR)
            .with_foreground("red")
            .with_bold(true)]);
        let view = buffer.view(&styles);
        assert_eq!(strip_ansi_escapes::strip_str(&view), "boom\n\nafter\n");
        assert_eq!(view.lines().count(), 3);
    }
}
