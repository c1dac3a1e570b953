//! Popup behaviour settings and their TOML form.
//!
//! ```rust
//! use bubbletea_autocomplete::autocomplete::AutoCompleteConfig;
//!
//! let config = AutoCompleteConfig::from_toml(r#"
//!     [popup]
//!     max_visible_rows = 5
//!     offset = { x = 2, y = 0 }
//!
//!     [[triggers]]
//!     kind = "text_length"
//!     threshold = 1
//!
//!     [[triggers]]
//!     kind = "shortcut"
//!     key = "enter"
//!     state = "SelectAndConsume"
//! "#).unwrap();
//!
//! assert_eq!(config.popup.max_visible_rows, 5);
//! assert_eq!(config.trigger_chain().len(), 2);
//! ```

use super::geometry::Point;
use super::trigger::{default_chain, Trigger, TriggerChain};
use serde::Deserialize;

/// Rows shown before the popup starts scrolling.
pub const DEFAULT_MAX_VISIBLE_ROWS: usize = 8;

/// Tunables of the popup controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Maximum number of rows visible at once.
    pub max_visible_rows: usize,
    /// Offset of the popup from the input's bottom-left corner.
    pub offset: Point,
    /// Popup width; `None` follows the width of the input.
    pub popup_width: Option<i32>,
    /// Highlight the first row whenever the list is refreshed without a
    /// surviving selection.
    pub select_first_on_refresh: bool,
    /// Report a `SelectAndConsume` key as consumed even while the popup is
    /// hidden.
    pub consume_select_when_hidden: bool,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            max_visible_rows: DEFAULT_MAX_VISIBLE_ROWS,
            offset: Point::default(),
            popup_width: None,
            select_first_on_refresh: false,
            consume_select_when_hidden: true,
        }
    }
}

impl PopupConfig {
    /// Sets the maximum number of visible rows (at least one).
    pub fn with_max_visible_rows(mut self, rows: usize) -> Self {
        self.max_visible_rows = rows.max(1);
        self
    }

    /// Sets the popup offset.
    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    /// Sets a fixed popup width, or `None` to follow the input width.
    pub fn with_popup_width(mut self, width: Option<i32>) -> Self {
        self.popup_width = width;
        self
    }

    /// Enables or disables highlighting the first row on refresh.
    pub fn with_select_first_on_refresh(mut self, enabled: bool) -> Self {
        self.select_first_on_refresh = enabled;
        self
    }

    /// Controls whether `SelectAndConsume` swallows its key while hidden.
    pub fn with_consume_select_when_hidden(mut self, enabled: bool) -> Self {
        self.consume_select_when_hidden = enabled;
        self
    }
}

/// Complete autocomplete configuration as loaded from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AutoCompleteConfig {
    /// Popup behaviour.
    pub popup: PopupConfig,
    /// Trigger chain; the default chain is used when absent.
    pub triggers: Option<Vec<Trigger>>,
}

impl AutoCompleteConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] when the document is malformed,
    /// including unknown trigger kinds and unparseable key strings.
    pub fn from_toml(source: &str) -> crate::Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// The configured trigger chain, or the default chain.
    pub fn trigger_chain(&self) -> TriggerChain {
        match &self.triggers {
            Some(triggers) => triggers.iter().cloned().collect(),
            None => default_chain(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::TriggerState;
    use crate::key::KeyPress;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn empty_document_gives_defaults() {
        let config = AutoCompleteConfig::from_toml("").unwrap();
        assert_eq!(config.popup, PopupConfig::default());
        assert_eq!(config.trigger_chain(), default_chain());
    }

    #[test]
    fn triggers_are_read_in_order() {
        let config = AutoCompleteConfig::from_toml(
            r#"
            [[triggers]]
            kind = "shortcut"
            key = "ctrl+space"
            state = "ShowAndConsume"

            [[triggers]]
            kind = "text_length"
            threshold = 3
            "#,
        )
        .unwrap();

        let chain = config.trigger_chain();
        assert_eq!(chain.len(), 2);
        assert_eq!(
            chain.on_command_key(&KeyPress::new(KeyCode::Char(' '), KeyModifiers::CONTROL)),
            TriggerState::ShowAndConsume
        );
        assert_eq!(chain.on_text_changed("ab"), TriggerState::Hide);
        assert_eq!(chain.on_text_changed("abc"), TriggerState::Show);
    }

    #[test]
    fn bad_key_is_a_config_error() {
        let err = AutoCompleteConfig::from_toml(
            r#"
            [[triggers]]
            kind = "shortcut"
            key = "hyper+q"
            state = "Show"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn popup_section_overrides_defaults() {
        let config = AutoCompleteConfig::from_toml(
            r#"
            [popup]
            popup_width = 40
            select_first_on_refresh = true
            consume_select_when_hidden = false
            "#,
        )
        .unwrap();
        assert_eq!(config.popup.popup_width, Some(40));
        assert!(config.popup.select_first_on_refresh);
        assert!(!config.popup.consume_select_when_hidden);
        assert_eq!(config.popup.max_visible_rows, DEFAULT_MAX_VISIBLE_ROWS);
    }
}
