//! Single-line text input for Bubble Tea applications.
//!
//! The input edits a value one character at a time with readline-style key
//! bindings and renders it with a reversed-cell cursor. It also implements
//! [`TextSurface`](crate::autocomplete::TextSurface), so it can anchor an
//! autocomplete popup.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_autocomplete::textinput::new;
//!
//! let mut input = new();
//! input.focus();
//! input.set_placeholder("Enter your name...");
//! input.set_width(30);
//! ```

pub mod keymap;
pub mod methods;
pub mod model;
pub mod surface;
pub mod view;


pub use keymap::{default_key_map, KeyMap};
pub use model::{new, Model};
