#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-autocomplete/")]

//! # bubbletea-autocomplete
//!
//! Trigger-driven autocomplete popups for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications, plus a styled log view fed by `tracing`.
//!
//! ## Overview
//!
//! The [`autocomplete`] engine watches a text surface and decides, through an
//! ordered chain of triggers, when a suggestion popup opens, closes or commits
//! its selection. It talks to the UI only through the [`autocomplete::TextSurface`]
//! and [`autocomplete::OverlaySurface`] traits, so the same controller drives
//! any widget pair that implements them.
//!
//! The crate ships one such pair for terminals:
//!
//! - [`textinput`]: a single-line text input.
//! - [`popup`]: a bordered, scrolling suggestion list.
//! - [`autocomplete_input`]: both of the above wired to a controller, ready
//!   to embed in a bubbletea model.
//!
//! [`logview`] keeps a bounded log buffer, filled by a `tracing_subscriber`
//! layer and rendered with per-level colours.
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_autocomplete::prelude::*;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let entries: EntryCollection = ["Apple", "Banana", "Apricot"]
//!     .into_iter()
//!     .map(|s| Entry::new(s).unwrap())
//!     .collect();
//!
//! let mut input = autocomplete_input_new().with_entries(entries);
//! input.focus();
//! for ch in "ap".chars() {
//!     input.update(Box::new(KeyMsg { key: KeyCode::Char(ch), modifiers: KeyModifiers::NONE }));
//! }
//! input.update(Box::new(KeyMsg { key: KeyCode::Down, modifiers: KeyModifiers::NONE }));
//! input.update(Box::new(KeyMsg { key: KeyCode::Enter, modifiers: KeyModifiers::NONE }));
//!
//! assert_eq!(input.value(), "Apple");
//! assert!(!input.is_popup_visible());
//! ```
//!
//! ## Configuration
//!
//! Popup and log view settings can be loaded from TOML; see
//! [`autocomplete::AutoCompleteConfig`] and [`logview::LogViewConfig`].

pub mod autocomplete;
pub mod autocomplete_input;
pub mod error;
pub mod key;
pub mod logview;
pub mod popup;
pub mod textinput;

use bubbletea_rs::Cmd;

/// Keyboard focus for components.
///
/// A focused component receives key input and draws its cursor; a blurred
/// one ignores keys.
///
/// ```rust
/// use bubbletea_autocomplete::prelude::*;
///
/// fn toggle<T: Component>(component: &mut T) {
///     let _ = component.focus();
///     assert!(component.focused());
///     component.blur();
///     assert!(!component.focused());
/// }
///
/// let mut input = textinput_new();
/// toggle(&mut input);
/// ```
pub trait Component {
    /// Focuses the component. The returned command, if any, should be run by
    /// the program.
    fn focus(&mut self) -> Option<Cmd>;

    /// Removes focus from the component.
    fn blur(&mut self);

    /// Reports whether the component has focus.
    fn focused(&self) -> bool;
}

pub use autocomplete::{
    AutoCompleteConfig, Entry, EntryCollection, Mode, PopupController, Trigger, TriggerAction,
    TriggerChain,
};
pub use autocomplete_input::{new as autocomplete_input_new, Model as AutoCompleteInput};
pub use error::{Error, Result};
pub use key::{Binding, KeyPress};
pub use logview::{LogBuffer, LogViewConfig, LogViewLayer, StyleMap};
pub use popup::{new as popup_new, Model as Popup};
pub use textinput::{
    default_key_map as textinput_default_key_map, new as textinput_new,
    KeyMap as TextInputKeyMap, Model as TextInput,
};

/// Common imports.
///
/// ```rust
/// use bubbletea_autocomplete::prelude::*;
///
/// let input: AutoCompleteInput = autocomplete_input_new();
/// assert!(!input.is_popup_visible());
/// ```
pub mod prelude {
    pub use crate::autocomplete::{
        default_chain, AutoCompleteConfig, BorderStyle, Entry, EntryCollection, Mode,
        OverlaySurface, Point, PopupController, Rect, Size, TextSurface, Trigger, TriggerAction,
        TriggerChain, TriggerState,
    };
    pub use crate::Component;
    pub use crate::{
        autocomplete_input_new, popup_new, textinput_default_key_map, textinput_new,
        AutoCompleteInput, Binding, KeyPress, LogBuffer, LogViewConfig, LogViewLayer, Popup,
        StyleMap, TextInput, TextInputKeyMap,
    };
}
