//! Detection of interactions that happen outside the text input.
//!
//! The popup has to close when the user clicks anywhere else in the window,
//! even on widgets that never receive keyboard focus, and when the window is
//! moved or resized (the popup would be left floating at a stale position).
//! Those events never reach the text input itself, so the host forwards its
//! window-level event stream to the controller, which consults this watcher.
//!
//! The watcher only reacts while attached. The controller attaches it when
//! the popup becomes visible and detaches it on every hide.

use super::geometry::{Point, Rect, Size};
use tracing::trace;

/// Coordinate space a pointer position is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateSpace {
    /// Relative to the window's client area.
    #[default]
    Window,
    /// Absolute screen coordinates, as reported for window chrome.
    Screen,
}

/// Mouse button of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Middle button or wheel click.
    Middle,
}

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// A button went down.
    Press,
    /// A button was double-clicked.
    DoubleClick,
    /// A button was released.
    Release,
    /// The pointer moved.
    Move,
}

/// A pointer event from the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Where the event happened.
    pub position: Point,
    /// The coordinate space of `position`.
    pub space: CoordinateSpace,
    /// Button involved.
    pub button: PointerButton,
    /// Kind of event.
    pub kind: PointerKind,
}

impl PointerEvent {
    /// A left button press at a window-relative position.
    pub const fn press(position: Point) -> Self {
        Self {
            position,
            space: CoordinateSpace::Window,
            button: PointerButton::Left,
            kind: PointerKind::Press,
        }
    }

    /// Reports whether this is a button press or double-click.
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, PointerKind::Press | PointerKind::DoubleClick)
    }

    /// Position of the event on screen, given the window's origin.
    pub const fn screen_position(&self, window_origin: Point) -> Point {
        match self.space {
            CoordinateSpace::Window => self.position.offset(window_origin),
            CoordinateSpace::Screen => self.position,
        }
    }
}

/// Window-level events the watcher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// A pointer event anywhere in the window.
    Pointer(PointerEvent),
    /// The window moved.
    Moved,
    /// The window was resized.
    Resized(Size),
}

/// Why the watcher asks for the popup to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutsideInteraction {
    /// A press landed outside the control, at this screen position.
    Pointer(Point),
    /// The window moved.
    WindowMoved,
    /// The window was resized.
    WindowResized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Attachment {
    control: Rect,
    window_origin: Point,
}

/// Watches window events for interactions outside the text control.
#[derive(Debug, Default)]
pub struct OutsideInteractionWatcher {
    attachment: Option<Attachment>,
}

impl OutsideInteractionWatcher {
    /// Creates a detached watcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts watching. `control` is window-relative; it is translated to
    /// screen coordinates with `window_origin`. Re-attaching replaces the
    /// previous bounds.
    pub fn attach(&mut self, control: Rect, window_origin: Point) {
        let control = control.translate(window_origin);
        trace!(?control, "outside interaction watcher attached");
        self.attachment = Some(Attachment {
            control,
            window_origin,
        });
    }

    /// Stops watching. Returns whether the watcher was attached.
    pub fn detach(&mut self) -> bool {
        let was_attached = self.attachment.take().is_some();
        if was_attached {
            trace!("outside interaction watcher detached");
        }
        was_attached
    }

    /// Reports whether the watcher is attached.
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Screen bounds of the watched control, while attached.
    pub fn control_bounds(&self) -> Option<Rect> {
        self.attachment.map(|a| a.control)
    }

    /// Screen position of a pointer event, using the attached window origin.
    /// Detached watchers treat window coordinates as screen coordinates.
    pub fn screen_position(&self, event: &PointerEvent) -> Point {
        let origin = self
            .attachment
            .map(|a| a.window_origin)
            .unwrap_or_default();
        event.screen_position(origin)
    }

    /// Classifies a window event. Returns `Some` when the popup should close.
    pub fn observe(&self, event: &WindowEvent) -> Option<OutsideInteraction> {
        let attachment = self.attachment?;
        match event {
            WindowEvent::Moved => Some(OutsideInteraction::WindowMoved),
            WindowEvent::Resized(_) => Some(OutsideInteraction::WindowResized),
            WindowEvent::Pointer(pointer) if pointer.is_press() => {
                let point = pointer.screen_position(attachment.window_origin);
                (!attachment.control.contains(point)).then_some(OutsideInteraction::Pointer(point))
            }
            WindowEvent::Pointer(_) => None,
        }
    }
}
