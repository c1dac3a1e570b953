//! Text input with an autocomplete popup.
//!
//! This component wires a [`textinput::Model`] and a [`popup::Model`] to a
//! [`PopupController`] and translates bubbletea messages into controller
//! notifications:
//!
//! - key presses are offered to the controller first (arrow navigation,
//!   shortcut triggers); keys it does not consume go to the text input, and a
//!   changed value runs the text triggers;
//! - mouse events become window pointer events, so clicking a popup row
//!   commits it and clicking elsewhere closes the popup;
//! - terminal resizes close the popup.
//!
//! # Example
//!
//! ```rust
//! use bubbletea_autocomplete::autocomplete::{Entry, EntryCollection};
//! use bubbletea_autocomplete::autocomplete_input;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let entries: EntryCollection = ["Apple", "Banana", "Apricot"]
//!     .into_iter()
//!     .map(|s| Entry::new(s).unwrap())
//!     .collect();
//!
//! let mut input = autocomplete_input::new().with_entries(entries);
//! input.focus();
//! for ch in "ap".chars() {
//!     input.update(Box::new(KeyMsg { key: KeyCode::Char(ch), modifiers: KeyModifiers::NONE }));
//! }
//! assert!(input.is_popup_visible());
//! ```

use crate::autocomplete::{
    AutoCompleteConfig, CoordinateSpace, EntryCollection, Point, PointerButton, PointerEvent,
    PointerKind, PopupController, Size, TextSurface, WindowEvent,
};
use crate::key::KeyPress;
use crate::{popup, textinput, Component};
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, MouseMsg, Msg, WindowSizeMsg};
use crossterm::event::{MouseButton, MouseEventKind};
use tracing::trace;

/// An autocomplete text input.
#[derive(Debug)]
pub struct Model {
    controller: PopupController<textinput::Model, popup::Model>,
}

/// Creates an unfocused autocomplete input with no entries.
pub fn new() -> Model {
    Model {
        controller: PopupController::new(textinput::new(), popup::new()),
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// Sets the candidate entries.
    pub fn with_entries(mut self, entries: EntryCollection) -> Self {
        self.controller.set_entries(entries);
        self
    }

    /// Applies a loaded configuration: popup settings and trigger chain.
    pub fn with_config(mut self, config: &AutoCompleteConfig) -> Self {
        *self.controller.config_mut() = config.popup.clone();
        *self.controller.triggers_mut() = config.trigger_chain();
        self
    }

    /// The underlying controller.
    pub fn controller(&self) -> &PopupController<textinput::Model, popup::Model> {
        &self.controller
    }

    /// Mutable access to the underlying controller.
    pub fn controller_mut(&mut self) -> &mut PopupController<textinput::Model, popup::Model> {
        &mut self.controller
    }

    /// The text input.
    pub fn input(&self) -> &textinput::Model {
        self.controller.text()
    }

    /// Mutable access to the text input, for styling and sizing.
    pub fn input_mut(&mut self) -> &mut textinput::Model {
        self.controller.text_mut()
    }

    /// The popup list.
    pub fn popup(&self) -> &popup::Model {
        self.controller.overlay()
    }

    /// Replaces the candidate entries.
    pub fn set_entries(&mut self, entries: EntryCollection) {
        self.controller.set_entries(entries);
    }

    /// Current text.
    pub fn value(&self) -> String {
        self.controller.text().value()
    }

    /// Replaces the text without running the triggers.
    pub fn set_value(&mut self, value: &str) {
        self.controller.set_text(value);
    }

    /// Sets the visible width of the text input.
    pub fn set_width(&mut self, width: i32) {
        self.controller.text_mut().set_width(width);
    }

    /// Places the input at `origin`, relative to the terminal window. The
    /// popup and pointer hit-testing follow it.
    pub fn set_origin(&mut self, origin: Point) {
        self.controller.text_mut().set_origin(origin);
    }

    /// Reports whether the popup is open.
    pub fn is_popup_visible(&self) -> bool {
        self.controller.is_visible()
    }

    /// Gives the input keyboard focus.
    pub fn focus(&mut self) {
        self.controller.text_mut().focus();
    }

    /// Removes keyboard focus and closes the popup.
    pub fn blur(&mut self) {
        self.controller.text_mut().blur();
        self.controller.on_focus_lost();
    }

    /// Reports whether the input has keyboard focus.
    pub fn focused(&self) -> bool {
        self.controller.text().focused()
    }

    /// Handles one key press and returns whether it changed anything.
    pub fn handle_key(&mut self, key: &KeyPress) -> bool {
        if !self.focused() {
            return false;
        }
        if self.controller.on_command_key(key) {
            trace!(%key, "key consumed by autocomplete");
            return true;
        }

        let before = self.controller.text().value();
        let handled = self.controller.text_mut().handle_key(key);
        if self.controller.text().value() != before {
            self.controller.on_text_changed();
        }
        handled
    }

    /// Handles a mouse event at a window cell.
    pub fn handle_mouse(&mut self, x: u16, y: u16, kind: MouseEventKind) -> bool {
        let (kind, button) = match kind {
            MouseEventKind::Down(button) => (PointerKind::Press, pointer_button(button)),
            MouseEventKind::Up(button) => (PointerKind::Release, pointer_button(button)),
            MouseEventKind::Drag(button) => (PointerKind::Move, pointer_button(button)),
            MouseEventKind::Moved => (PointerKind::Move, PointerButton::Left),
            _ => return false,
        };
        let event = PointerEvent {
            position: Point::new(i32::from(x), i32::from(y)),
            space: CoordinateSpace::Window,
            button,
            kind,
        };
        self.controller.on_window_event(&WindowEvent::Pointer(event))
    }

    /// Handles a terminal resize.
    pub fn handle_resize(&mut self, width: u16, height: u16) -> bool {
        let size = Size::new(i32::from(width), i32::from(height));
        self.controller.on_window_event(&WindowEvent::Resized(size))
    }

    /// Processes a bubbletea message.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            self.handle_key(&KeyPress::from(key_msg));
        } else if let Some(mouse) = msg.downcast_ref::<MouseMsg>() {
            self.handle_mouse(mouse.x, mouse.y, mouse.button);
        } else if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.handle_resize(size.width, size.height);
        }
        None
    }

    /// Renders the input line and, while open, the popup under it.
    pub fn view(&self) -> String {
        let input = self.controller.text().view();
        let popup = self.controller.overlay();
        if !self.controller.is_visible() {
            return input;
        }

        let anchor = self.controller.text().screen_bounds();
        let origin = popup.origin();
        let indent = " ".repeat((origin.x - anchor.x).max(0) as usize);
        let gap = (origin.y - anchor.bottom()).max(0) as usize;

        let mut out = input;
        out.push('\n');
        out.push_str(&"\n".repeat(gap));
        let lines: Vec<String> = popup
            .view()
            .lines()
            .map(|line| format!("{indent}{line}"))
            .collect();
        out.push_str(&lines.join("\n"));
        out
    }
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Left,
        MouseButton::Right => PointerButton::Right,
        MouseButton::Middle => PointerButton::Middle,
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
