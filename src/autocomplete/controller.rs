//! The popup state machine.
//!
//! [`PopupController`] owns a text surface and an overlay surface and keeps
//! them consistent: it decides when the popup is visible, which row is
//! highlighted, and when the highlighted entry is written into the text box.
//!
//! States are `Hidden` and `Visible`. Trigger verdicts, navigation keys,
//! pointer presses, focus loss and window events move the machine between
//! them; every transition completes before the call returns.
//!
//! # Selection and [`Mode`]
//!
//! A row can become selected in two ways: the user picks it in the list, or
//! the controller moves the highlight itself (arrow keys, list refresh).
//! Only the first commits the entry. Every controller-driven selection change
//! runs with the mode temporarily set to [`Mode::List`], and the
//! selection-changed handler commits only in [`Mode::Text`].

use super::config::PopupConfig;
use super::entry::{Entry, EntryCollection};
use super::filter::filter_entries;
use super::geometry::{Point, Rect, Size};
use super::surface::{OverlaySurface, TextSurface};
use super::trigger::{default_chain, TriggerAction, TriggerChain, TriggerState};
use super::watcher::{OutsideInteractionWatcher, WindowEvent};
use crate::key::{Binding, KeyPress};
use crossterm::event::KeyCode;
use std::sync::Arc;
use tracing::{debug, trace};

/// Who is driving selection changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The user; a selection change commits the entry.
    #[default]
    Text,
    /// The controller; selection changes only move the highlight.
    List,
}

/// Keys that move the highlight through the list.
#[derive(Debug, Clone)]
pub struct NavigationKeys {
    /// Moves the highlight up one row.
    pub up: Binding,
    /// Moves the highlight down one row.
    pub down: Binding,
}

impl Default for NavigationKeys {
    fn default() -> Self {
        Self {
            up: Binding::new([KeyCode::Up]),
            down: Binding::new([KeyCode::Down]),
        }
    }
}

/// Autocomplete state machine over a text surface `T` and an overlay `O`.
pub struct PopupController<T, O> {
    text: T,
    overlay: O,
    entries: EntryCollection,
    filtered: EntryCollection,
    triggers: TriggerChain,
    navigation: NavigationKeys,
    config: PopupConfig,
    watcher: OutsideInteractionWatcher,
    visible: bool,
    selected: Option<usize>,
    mode: Mode,
    /// Text last written by the controller, until the host echoes it back.
    own_write: Option<String>,
    overlay_origin: Point,
    overlay_size: Size,
}

impl<T: TextSurface, O: OverlaySurface> PopupController<T, O> {
    /// Creates a hidden controller with no entries and the default trigger chain.
    pub fn new(text: T, overlay: O) -> Self {
        Self {
            text,
            overlay,
            entries: EntryCollection::new(),
            filtered: EntryCollection::new(),
            triggers: default_chain(),
            navigation: NavigationKeys::default(),
            config: PopupConfig::default(),
            watcher: OutsideInteractionWatcher::new(),
            visible: false,
            selected: None,
            mode: Mode::Text,
            own_write: None,
            overlay_origin: Point::default(),
            overlay_size: Size::default(),
        }
    }

    /// Sets the candidate entries.
    pub fn with_entries(mut self, entries: EntryCollection) -> Self {
        self.entries = entries;
        self
    }

    /// Replaces the trigger chain.
    pub fn with_triggers(mut self, triggers: TriggerChain) -> Self {
        self.triggers = triggers;
        self
    }

    /// Replaces the popup configuration.
    pub fn with_config(mut self, config: PopupConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the navigation key bindings.
    pub fn with_navigation(mut self, navigation: NavigationKeys) -> Self {
        self.navigation = navigation;
        self
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// The text surface.
    pub fn text(&self) -> &T {
        &self.text
    }

    /// Mutable access to the text surface. Edits made here are not seen by
    /// the triggers until [`on_text_changed`](Self::on_text_changed) is called.
    pub fn text_mut(&mut self) -> &mut T {
        &mut self.text
    }

    /// The overlay surface.
    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Mutable access to the overlay surface.
    pub fn overlay_mut(&mut self) -> &mut O {
        &mut self.overlay
    }

    /// All candidate entries.
    pub fn entries(&self) -> &EntryCollection {
        &self.entries
    }

    /// Replaces the candidate entries. A visible popup is refreshed.
    pub fn set_entries(&mut self, entries: EntryCollection) {
        self.entries = entries;
        if self.visible {
            self.refresh();
        }
    }

    /// Entries currently listed in the popup.
    pub fn filtered_entries(&self) -> &EntryCollection {
        &self.filtered
    }

    /// The trigger chain.
    pub fn triggers(&self) -> &TriggerChain {
        &self.triggers
    }

    /// Mutable access to the trigger chain.
    pub fn triggers_mut(&mut self) -> &mut TriggerChain {
        &mut self.triggers
    }

    /// The popup configuration.
    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    /// Mutable access to the popup configuration.
    pub fn config_mut(&mut self) -> &mut PopupConfig {
        &mut self.config
    }

    /// Reports whether the popup is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Highlighted row of the filtered list.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Highlighted entry.
    pub fn selected_entry(&self) -> Option<&Arc<Entry>> {
        self.selected.and_then(|i| self.filtered.get(i))
    }

    /// Current selection mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Reports whether the outside interaction watcher is attached.
    pub fn is_watching(&self) -> bool {
        self.watcher.is_attached()
    }

    /// Screen bounds of the popup as last positioned and sized.
    pub fn overlay_bounds(&self) -> Rect {
        Rect::from_origin_size(self.overlay_origin, self.overlay_size)
    }

    // ---------------------------------------------------------------------
    // Host notifications
    // ---------------------------------------------------------------------

    /// Writes `text` into the text surface without consulting the triggers.
    ///
    /// A host that reports the write back through [`Self::on_text_changed`]
    /// gets that one notification ignored, as long as the text still reads
    /// `text`.
    pub fn set_text(&mut self, text: &str) {
        self.text.set_text(text);
        self.own_write = Some(text.to_string());
    }

    /// Handles a change of the input text and returns the verdict applied.
    pub fn on_text_changed(&mut self) -> TriggerState {
        let text = self.text.text();
        if self.own_write.take().is_some_and(|written| written == text) {
            trace!("ignoring echo of own write");
            return TriggerState::None;
        }
        let verdict = self.triggers.on_text_changed(&text);
        trace!(?verdict, "text changed");
        match verdict.action() {
            TriggerAction::Show => self.show(),
            TriggerAction::Hide => self.hide(),
            _ => self.refresh(),
        }
        verdict
    }

    /// Handles a command key. Returns `true` when the host must swallow the key.
    pub fn on_command_key(&mut self, key: &KeyPress) -> bool {
        if self.navigation.up.matches(key) {
            self.navigate_up();
            return true;
        }
        if self.navigation.down.matches(key) {
            self.navigate_down();
            return true;
        }
        let verdict = self.triggers.on_command_key(key);
        if verdict != TriggerState::None {
            trace!(%key, ?verdict, "command key");
        }
        self.apply(verdict)
    }

    /// Applies a verdict and returns whether the triggering key is consumed.
    pub fn apply(&mut self, verdict: TriggerState) -> bool {
        match verdict.action() {
            TriggerAction::None => false,
            TriggerAction::Show => {
                self.show();
                verdict.is_consumed()
            }
            TriggerAction::Hide => {
                self.hide();
                verdict.is_consumed()
            }
            TriggerAction::Select => {
                let was_visible = self.visible;
                if was_visible {
                    self.select_current();
                }
                verdict.is_consumed() && (was_visible || self.config.consume_select_when_hidden)
            }
        }
    }

    /// Handles loss of keyboard focus by the text surface.
    pub fn on_focus_lost(&mut self) {
        if !self.visible || self.text.has_focus() || self.overlay.has_focus() {
            return;
        }
        debug!("focus left the input, hiding popup");
        self.hide();
    }

    /// Handles a press on row `index` of the popup: the row is committed and
    /// the popup closes.
    pub fn on_item_clicked(&mut self, index: usize) {
        if index < self.filtered.len() {
            self.with_mode(Mode::List, |this| this.set_selection(Some(index)));
            self.select_current();
        }
        self.hide();
    }

    /// Handles a selection change reported by the overlay.
    pub fn on_selection_changed(&mut self) {
        self.selected = self
            .overlay
            .selected_index()
            .filter(|i| *i < self.filtered.len());
        self.selection_changed();
    }

    /// Handles a window-level event. Presses on the popup hit its rows;
    /// everything else goes through the outside interaction watcher.
    /// Returns `true` when the event changed the popup state.
    pub fn on_window_event(&mut self, event: &WindowEvent) -> bool {
        if !self.visible {
            return false;
        }

        if let WindowEvent::Pointer(pointer) = event {
            let point = self.watcher.screen_position(pointer);
            if pointer.is_press() && self.overlay_bounds().contains(point) {
                let local = point.relative_to(self.overlay_origin);
                match self.overlay.item_at(local) {
                    Some(index) => self.on_item_clicked(index),
                    None => self.hide(),
                }
                return true;
            }
        }

        match self.watcher.observe(event) {
            Some(reason) => {
                debug!(?reason, "outside interaction, hiding popup");
                self.hide();
                true
            }
            None => false,
        }
    }

    // ---------------------------------------------------------------------
    // Transitions
    // ---------------------------------------------------------------------

    /// Shows the popup, or refreshes it when already visible. Stays hidden
    /// when no entry matches.
    pub fn show(&mut self) {
        if self.visible {
            self.refresh();
            return;
        }

        self.selected = None;
        self.overlay.set_selected_index(None);
        self.refresh();

        let anchor = self.text.bounds();
        let window_origin = self.text.window_origin();
        self.overlay_origin = anchor
            .translate(window_origin)
            .bottom_left()
            .offset(self.config.offset);
        self.overlay.position(self.overlay_origin);

        if self.filtered.is_empty() {
            trace!("nothing to show");
            return;
        }

        self.overlay.show();
        self.visible = true;
        self.watcher.attach(anchor, window_origin);
        self.text.focus();
        debug!(rows = self.filtered.len(), "popup shown");
    }

    /// Hides the popup. Hiding a hidden popup is a no-op apart from
    /// resetting the mode.
    pub fn hide(&mut self) {
        self.mode = Mode::Text;
        self.watcher.detach();
        if self.visible {
            self.overlay.hide();
            self.visible = false;
            debug!("popup hidden");
        }
    }

    /// Commits the highlighted entry into the text surface and hides the
    /// popup. Returns `false` when nothing is highlighted.
    pub fn select_current(&mut self) -> bool {
        let Some(entry) = self.selected_entry().cloned() else {
            return false;
        };

        self.text.focus();
        self.set_text(entry.display());
        self.text.set_caret(entry.display().chars().count());
        debug!(display = entry.display(), "entry committed");
        self.hide();
        true
    }

    /// Moves the highlight up one row, stopping at the first row.
    pub fn navigate_up(&mut self) {
        self.mode = Mode::List;
        let target = match self.selected {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.move_highlight(target);
    }

    /// Moves the highlight down one row, stopping at the last row.
    pub fn navigate_down(&mut self) {
        self.mode = Mode::List;
        let target = self.selected.map_or(0, |i| i + 1);
        self.move_highlight(target);
    }

    /// Programmatically highlights a row. Outside the controller's own
    /// navigation this counts as a user choice: in [`Mode::Text`] the entry
    /// is committed immediately.
    pub fn select_row(&mut self, index: Option<usize>) {
        let index = index.filter(|i| *i < self.filtered.len());
        self.set_selection(index);
    }

    /// Recomputes the filtered list from the current text and pushes it to
    /// the overlay, keeping the highlighted entry when it still matches.
    pub fn refresh(&mut self) {
        let previous = self.selected_entry().cloned();
        self.filtered = filter_entries(&self.text.text(), &self.entries);
        self.overlay.set_items(self.filtered.as_slice());
        trace!(rows = self.filtered.len(), "list refreshed");

        self.selected = None;
        self.overlay.set_selected_index(None);
        if let Some(index) = previous.and_then(|entry| self.filtered.position_of(&entry)) {
            self.with_mode(Mode::List, |this| this.set_selection(Some(index)));
        }

        if self.filtered.is_empty() {
            self.hide();
            return;
        }

        self.overlay_size = self.popup_size();
        self.overlay.resize(self.overlay_size);

        if self.selected.is_none() && self.config.select_first_on_refresh {
            self.with_mode(Mode::List, |this| this.set_selection(Some(0)));
        }
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn popup_size(&self) -> Size {
        let rows = self
            .filtered
            .len()
            .min(self.config.max_visible_rows.max(1)) as i32;
        let height = rows * self.overlay.row_height() + self.overlay.border_style().height_allowance();
        let width = self
            .config
            .popup_width
            .unwrap_or_else(|| self.text.bounds().width);
        Size::new(width, height)
    }

    fn move_highlight(&mut self, target: usize) {
        if self.filtered.is_empty() {
            return;
        }
        let target = target.min(self.filtered.len() - 1);
        trace!(from = ?self.selected, to = target, "navigate");
        self.set_selection(Some(target));
    }

    fn with_mode<R>(&mut self, mode: Mode, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::replace(&mut self.mode, mode);
        let result = f(self);
        self.mode = saved;
        result
    }

    fn set_selection(&mut self, index: Option<usize>) {
        self.selected = index;
        self.overlay.set_selected_index(index);
        self.selection_changed();
    }

    fn selection_changed(&mut self) {
        if self.mode == Mode::List {
            return;
        }
        self.select_current();
    }
}

impl<T, O> Drop for PopupController<T, O> {
    fn drop(&mut self) {
        self.watcher.detach();
    }
}

impl<T, O> std::fmt::Debug for PopupController<T, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopupController")
            .field("visible", &self.visible)
            .field("selected", &self.selected)
            .field("mode", &self.mode)
            .field("filtered", &self.filtered.len())
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
