//! Trigger-driven autocomplete engine.
//!
//! The engine is independent of any particular UI toolkit. A host provides a
//! [`TextSurface`] (the text box) and an [`OverlaySurface`] (the popup list)
//! and forwards its notifications to a [`PopupController`]. The terminal
//! widget in [`crate::autocomplete_input`] is one such host.
//!
//! # Pieces
//!
//! - [`Entry`] / [`EntryCollection`]: the candidates.
//! - [`filter_entries`]: case-insensitive prefix filter.
//! - [`Trigger`] / [`TriggerChain`]: decide show, hide or commit per event.
//! - [`PopupController`]: the state machine.
//! - [`OutsideInteractionWatcher`]: closes the popup on clicks elsewhere and
//!   on window moves.
//!
//! # Example
//!
//! ```rust
//! use bubbletea_autocomplete::autocomplete::{Entry, EntryCollection, PopupController};
//! use bubbletea_autocomplete::{popup, textinput};
//!
//! let entries: EntryCollection = ["Apple", "Banana", "Apricot"]
//!     .into_iter()
//!     .map(|s| Entry::new(s).unwrap())
//!     .collect();
//!
//! let mut input = textinput::new();
//! input.set_width(20);
//! let mut controller = PopupController::new(input, popup::new()).with_entries(entries);
//!
//! controller.text_mut().set_value("ap");
//! controller.on_text_changed();
//!
//! assert!(controller.is_visible());
//! let shown: Vec<&str> = controller.filtered_entries().iter().map(|e| e.display()).collect();
//! assert_eq!(shown, ["Apple", "Apricot"]);
//! ```

pub mod config;
pub mod controller;
pub mod entry;
pub mod filter;
pub mod geometry;
pub mod surface;
pub mod trigger;
pub mod watcher;


pub use config::{AutoCompleteConfig, PopupConfig, DEFAULT_MAX_VISIBLE_ROWS};
pub use controller::{Mode, NavigationKeys, PopupController};
pub use entry::{Entry, EntryCollection};
pub use filter::filter_entries;
pub use geometry::{Point, Rect, Size};
pub use surface::{BorderStyle, OverlaySurface, TextSurface};
pub use trigger::{default_chain, Trigger, TriggerAction, TriggerChain, TriggerState};
pub use watcher::{
    CoordinateSpace, OutsideInteraction, OutsideInteractionWatcher, PointerButton, PointerEvent,
    PointerKind, WindowEvent,
};
