//! Terminal popup list.
//!
//! A bordered, scrollable single-selection list that floats below a text
//! input. It implements [`OverlaySurface`] so a
//! [`PopupController`](crate::autocomplete::PopupController) can position,
//! size, fill and highlight it. The popup never decides anything on its own:
//! it only renders the state the controller pushes into it.
//!
//! ```rust
//! use bubbletea_autocomplete::autocomplete::{Entry, OverlaySurface, Size};
//! use bubbletea_autocomplete::popup;
//! use std::sync::Arc;
//!
//! let mut list = popup::new();
//! list.set_items(&[Arc::new(Entry::new("Apple").unwrap())]);
//! list.resize(Size::new(12, 3));
//! list.show();
//! assert_eq!(list.view().lines().count(), 3);
//! ```

use crate::autocomplete::{BorderStyle, Entry, OverlaySurface, Point, Size};
use lipgloss_extras::lipgloss::{self, Border};
use lipgloss_extras::prelude::*;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Styles used when rendering the popup.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Style of an ordinary row.
    pub item: Style,
    /// Style of the highlighted row.
    pub selected: Style,
    /// Style the border is drawn with.
    pub frame: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            item: Style::new().foreground(Color::from("#dddddd")),
            selected: Style::new()
                .foreground(Color::from("#EE6FF8"))
                .reverse(true),
            frame: Style::new().foreground(Color::from("240")),
        }
    }
}

/// Popup list state.
#[derive(Debug, Clone)]
pub struct Model {
    items: Vec<Arc<Entry>>,
    selected: Option<usize>,
    visible: bool,
    origin: Point,
    size: Size,
    border: BorderStyle,
    /// First row shown.
    scroll: usize,
    /// Rendering styles.
    pub styles: Styles,
}

/// Creates a hidden, empty popup with a single-line border.
pub fn new() -> Model {
    Model {
        items: Vec::new(),
        selected: None,
        visible: false,
        origin: Point::default(),
        size: Size::default(),
        border: BorderStyle::default(),
        scroll: 0,
        styles: Styles::default(),
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// Sets the border style.
    pub fn with_border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Sets the border style.
    pub fn set_border(&mut self, border: BorderStyle) {
        self.border = border;
    }

    /// Rows currently in the list.
    pub fn items(&self) -> &[Arc<Entry>] {
        &self.items
    }

    /// Top-left corner on screen.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Current size in cells.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Index of the first row shown.
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Number of list rows that fit inside the border.
    pub fn visible_rows(&self) -> usize {
        (self.size.height - self.border.height_allowance()).max(0) as usize
    }

    fn inset(&self) -> i32 {
        self.border.top_inset()
    }

    fn inner_width(&self) -> usize {
        (self.size.width - 2 * self.inset()).max(0) as usize
    }

    fn clamp_scroll(&mut self) {
        let rows = self.visible_rows();
        let max_scroll = self.items.len().saturating_sub(rows.max(1));
        self.scroll = self.scroll.min(max_scroll);
    }

    fn ensure_selected_visible(&mut self) {
        if let Some(index) = self.selected {
            let rows = self.visible_rows().max(1);
            if index < self.scroll {
                self.scroll = index;
            } else if index >= self.scroll + rows {
                self.scroll = index + 1 - rows;
            }
        }
        self.clamp_scroll();
    }

    /// Renders the popup. A hidden popup renders as an empty string.
    pub fn view(&self) -> String {
        if !self.visible {
            return String::new();
        }

        let width = self.inner_width();
        let rows: Vec<String> = self
            .items
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(self.visible_rows())
            .map(|(i, entry)| {
                let cell = fit(entry.display(), width);
                if self.selected == Some(i) {
                    self.styles.selected.clone().render(&cell)
                } else {
                    self.styles.item.clone().render(&cell)
                }
            })
            .collect();

        let body = rows.join("\n");
        match self.border {
            BorderStyle::None => body,
            BorderStyle::Single => self.frame(lipgloss::normal_border(), 0).render(&body),
            BorderStyle::Raised3D => self.frame(lipgloss::double_border(), 1).render(&body),
        }
    }

    fn frame(&self, border: Border, padding: i32) -> Style {
        self.styles
            .frame
            .clone()
            .border_style(border)
            .border_top(true)
            .border_right(true)
            .border_bottom(true)
            .border_left(true)
            .padding(padding, padding, padding, padding)
    }
}

/// Truncates `text` to `width` cells on grapheme boundaries and pads the rest
/// with spaces.
fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if used + w > width {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

impl OverlaySurface for Model {
    fn position(&mut self, origin: Point) {
        self.origin = origin;
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.ensure_selected_visible();
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_items(&mut self, items: &[Arc<Entry>]) {
        self.items = items.to_vec();
        self.selected = self.selected.filter(|i| *i < self.items.len());
        self.clamp_scroll();
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.selected = index.filter(|i| *i < self.items.len());
        self.ensure_selected_visible();
    }

    fn row_height(&self) -> i32 {
        1
    }

    fn border_style(&self) -> BorderStyle {
        self.border
    }

    fn item_at(&self, point: Point) -> Option<usize> {
        let inset = self.inset();
        let row = point.y - inset;
        let inner = self.inner_width() as i32;
        if row < 0 || row as usize >= self.visible_rows() {
            return None;
        }
        if point.x < inset || point.x >= inset + inner {
            return None;
        }
        let index = self.scroll + row as usize;
        (index < self.items.len()).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(names: &[&str]) -> Vec<Arc<Entry>> {
        names
            .iter()
            .map(|n| Arc::new(Entry::new(*n).unwrap()))
            .collect()
    }

    fn shown(border: BorderStyle, names: &[&str], size: Size) -> Model {
        let mut m = new().with_border(border);
        m.set_items(&entries(names));
        m.resize(size);
        m.show();
        m
    }

    fn plain_lines(m: &Model) -> Vec<String> {
        strip_ansi_escapes::strip_str(m.view())
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn hidden_popup_renders_nothing() {
        let mut m = shown(BorderStyle::Single, &["a"], Size::new(5, 3));
        m.hide();
        assert_eq!(m.view(), "");
    }

    #[test]
    fn rows_without_border_are_padded_to_width() {
        let m = shown(BorderStyle::None, &["Apple", "Fig"], Size::new(6, 2));
        assert_eq!(plain_lines(&m), ["Apple ", "Fig   "]);
    }

    #[test]
    fn long_rows_are_truncated() {
        let m = shown(BorderStyle::None, &["Watermelon", "日本語"], Size::new(5, 2));
        assert_eq!(plain_lines(&m), ["Water", "日本 "]);
    }

    #[test]
    fn bordered_popup_has_requested_height() {
        let m = shown(BorderStyle::Single, &["Apple", "Apricot"], Size::new(10, 4));
        let lines = plain_lines(&m);
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("Apple"));
        assert!(lines[2].contains("Apricot"));

        // double border and padding take two cells a side
        let m = shown(BorderStyle::Raised3D, &["Apple", "Apricot"], Size::new(11, 6));
        let lines = plain_lines(&m);
        assert_eq!(lines.len(), 6);
        assert!(lines[2].contains("Apple"));
        assert!(lines[3].contains("Apricot"));

        let m = shown(BorderStyle::Raised3D, &["Apricot"], Size::new(10, 5));
        assert!(plain_lines(&m)[2].contains("Aprico "));
    }

    #[test]
    fn selection_scrolls_into_view() {
        let names: Vec<String> = (0..10).map(|i| format!("row{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut m = shown(BorderStyle::None, &refs, Size::new(6, 3));

        m.set_selected_index(Some(5));
        assert_eq!(m.scroll_offset(), 3);
        assert_eq!(plain_lines(&m), ["row3  ", "row4  ", "row5  "]);

        m.set_selected_index(Some(1));
        assert_eq!(m.scroll_offset(), 1);

        m.set_selected_index(Some(42));
        assert_eq!(m.selected_index(), None);
    }

    #[test]
    fn shrinking_the_list_clamps_scroll_and_selection() {
        let mut m = shown(BorderStyle::None, &["a", "b", "c", "d"], Size::new(3, 2));
        m.set_selected_index(Some(3));
        assert_eq!(m.scroll_offset(), 2);

        m.set_items(&entries(&["a", "b"]));
        assert_eq!(m.selected_index(), None);
        assert_eq!(m.scroll_offset(), 0);
    }

    #[test]
    fn item_at_accounts_for_border_and_scroll() {
        let mut m = shown(BorderStyle::Single, &["a", "b", "c", "d"], Size::new(6, 4));
        assert_eq!(m.item_at(Point::new(1, 1)), Some(0));
        assert_eq!(m.item_at(Point::new(4, 2)), Some(1));
        // border cells
        assert_eq!(m.item_at(Point::new(0, 1)), None);
        assert_eq!(m.item_at(Point::new(5, 1)), None);
        assert_eq!(m.item_at(Point::new(2, 0)), None);
        assert_eq!(m.item_at(Point::new(2, 3)), None);

        m.set_selected_index(Some(3));
        assert_eq!(m.item_at(Point::new(1, 1)), Some(2));
        assert_eq!(m.item_at(Point::new(1, 2)), Some(3));
    }

    #[test]
    fn item_at_past_last_row_is_none() {
        let m = shown(BorderStyle::None, &["only"], Size::new(6, 3));
        assert_eq!(m.item_at(Point::new(0, 0)), Some(0));
        assert_eq!(m.item_at(Point::new(0, 1)), None);
    }
}
