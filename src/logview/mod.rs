//! Styled log view.
//!
//! [`LogViewLayer`] is a `tracing_subscriber` layer that appends formatted
//! events to a shared [`LogBuffer`]. The host renders the buffer with a
//! [`StyleMap`], which draws each level in its configured colours.
//!
//! Mappings and the buffer limit can be loaded from TOML:
//!
//! ```rust
//! use bubbletea_autocomplete::logview::LogViewConfig;
//!
//! let config = LogViewConfig::from_toml(r#"
//!     max_len = 4096
//!
//!     [[mappings]]
//!     level = "ERROR"
//!     foreground = "Red"
//!     bold = true
//!
//!     [[mappings]]
//!     level = "WARN"
//!     foreground = "Blue"
//! "#).unwrap();
//!
//! assert_eq!(config.buffer().max_len(), 4096);
//! assert_eq!(config.style_map().mappings().len(), 2);
//! ```

pub mod buffer;
pub mod layer;
pub mod style;

pub use buffer::{LogBuffer, LogLine, DEFAULT_MAX_LEN};
pub use layer::LogViewLayer;
pub use style::{color_code, default_style_map, LevelStyle, StyleMap, TextAttributes};

use serde::Deserialize;

/// Log view settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogViewConfig {
    /// Maximum buffer length; absent or non-positive keeps the default.
    pub max_len: Option<i64>,
    /// Level style mappings; the built-in map is used when empty.
    pub mappings: Vec<LevelStyle>,
}

impl LogViewConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] when the document is malformed.
    pub fn from_toml(source: &str) -> crate::Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// An empty buffer with the configured limit.
    pub fn buffer(&self) -> LogBuffer {
        let mut buffer = LogBuffer::new();
        if let Some(max_len) = self.max_len {
            buffer.set_max_len(max_len);
        }
        buffer
    }

    /// The configured style map.
    pub fn style_map(&self) -> StyleMap {
        if self.mappings.is_empty() {
            default_style_map()
        } else {
            StyleMap::new(self.mappings.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = LogViewConfig::from_toml("").unwrap();
        assert_eq!(config.buffer().max_len(), DEFAULT_MAX_LEN);
        assert_eq!(config.style_map(), default_style_map());
    }

    #[test]
    fn negative_limit_keeps_default() {
        let config = LogViewConfig::from_toml("max_len = -1").unwrap();
        assert_eq!(config.buffer().max_len(), DEFAULT_MAX_LEN);
    }

    #[test]
    fn font_settings_are_accepted() {
        let config = LogViewConfig::from_toml(
            r#"
            [[mappings]]
            level = "error"
            foreground = "Black"
            background = "Red"
            bold = true
            point_size = 12.0
            font_family = "Lucida Console"
            "#,
        )
        .unwrap();
        let attrs = config.style_map().attributes(&tracing::Level::ERROR);
        assert_eq!(attrs.foreground.as_deref(), Some("0"));
        assert_eq!(attrs.background.as_deref(), Some("9"));
        assert!(attrs.bold);
    }

    #[test]
    fn wrong_types_are_config_errors() {
        let err = LogViewConfig::from_toml("max_len = \"big\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
