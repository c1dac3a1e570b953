//! Host-facing interfaces the controller drives.
//!
//! The controller never talks to a toolkit directly. It reads and writes the
//! text box through [`TextSurface`] and drives the popup through
//! [`OverlaySurface`]. This crate implements both for the terminal
//! (`textinput::Model` and `popup::Model`); other hosts implement them over
//! their own widgets.
//!
//! Notifications flow the other way: the host calls the controller's
//! `on_text_changed`, `on_command_key`, `on_focus_lost`, `on_item_clicked`,
//! `on_selection_changed` and `on_window_event` methods.

use super::entry::Entry;
use super::geometry::{Point, Rect, Size};
use std::sync::Arc;

/// Border drawn around the popup list. Each style reserves a fixed number of
/// rows in the popup height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    /// No border.
    None,
    /// A single line border.
    #[default]
    Single,
    /// A raised, two-line border.
    Raised3D,
}

impl BorderStyle {
    /// Total extra height, top plus bottom, taken by the border.
    pub const fn height_allowance(self) -> i32 {
        match self {
            BorderStyle::None => 0,
            BorderStyle::Single => 2,
            BorderStyle::Raised3D => 4,
        }
    }

    /// Rows taken by the border above the first list row.
    pub const fn top_inset(self) -> i32 {
        self.height_allowance() / 2
    }
}

/// The editable text box the popup is attached to.
pub trait TextSurface {
    /// Current text.
    fn text(&self) -> String;

    /// Replaces the text. Implementations must not call back into the
    /// controller from here; a host may report the change afterwards, and
    /// the controller ignores that report for its own writes.
    fn set_text(&mut self, text: &str);

    /// Caret position in characters.
    fn caret(&self) -> usize;

    /// Moves the caret, clamping to the text length.
    fn set_caret(&mut self, pos: usize);

    /// Gives keyboard focus to the text box.
    fn focus(&mut self);

    /// Reports whether the text box has keyboard focus.
    fn has_focus(&self) -> bool;

    /// Bounds of the text box relative to its window's client area.
    fn bounds(&self) -> Rect;

    /// Screen position of the window's client area origin.
    fn window_origin(&self) -> Point {
        Point::default()
    }

    /// Bounds of the text box in screen coordinates.
    fn screen_bounds(&self) -> Rect {
        self.bounds().translate(self.window_origin())
    }
}

/// A positionable popup hosting a single-selection list.
pub trait OverlaySurface {
    /// Moves the popup's top-left corner to `origin` (screen coordinates).
    fn position(&mut self, origin: Point);

    /// Resizes the popup.
    fn resize(&mut self, size: Size);

    /// Makes the popup visible.
    fn show(&mut self);

    /// Hides the popup.
    fn hide(&mut self);

    /// Reports whether the popup is visible.
    fn is_visible(&self) -> bool;

    /// Reports whether the popup or its list holds keyboard focus.
    fn has_focus(&self) -> bool {
        false
    }

    /// Replaces the list rows.
    fn set_items(&mut self, items: &[Arc<Entry>]);

    /// Currently highlighted row.
    fn selected_index(&self) -> Option<usize>;

    /// Highlights a row, or clears the highlight. Implementations must not
    /// call back into the controller from here.
    fn set_selected_index(&mut self, index: Option<usize>);

    /// Height of one list row.
    fn row_height(&self) -> i32;

    /// Border drawn around the list.
    fn border_style(&self) -> BorderStyle;

    /// Row under `point`, given relative to the popup's top-left corner.
    fn item_at(&self, point: Point) -> Option<usize>;
}
