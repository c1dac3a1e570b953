//! Level-to-style mappings.

use lipgloss_extras::prelude::*;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::Level;

/// Named colours accepted in mappings, lower-cased, mapped to terminal
/// colour codes. Names follow the familiar desktop colour names; anything
/// else may be given as `#rrggbb` or an ANSI index.
static NAMED_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("black", "0"),
        ("maroon", "1"),
        ("darkred", "1"),
        ("green", "2"),
        ("darkgreen", "#006400"),
        ("olive", "3"),
        ("navy", "4"),
        ("darkblue", "4"),
        ("purple", "5"),
        ("teal", "6"),
        ("silver", "7"),
        ("gray", "8"),
        ("grey", "8"),
        ("red", "9"),
        ("lime", "10"),
        ("yellow", "11"),
        ("blue", "12"),
        ("fuchsia", "13"),
        ("magenta", "13"),
        ("aqua", "14"),
        ("cyan", "14"),
        ("white", "15"),
        ("orange", "#FFA500"),
        ("darkorange", "#FF8C00"),
        ("brown", "#A52A2A"),
        ("pink", "#FFC0CB"),
        ("gold", "#FFD700"),
        ("lightgray", "252"),
        ("darkgray", "240"),
        ("controltext", "15"),
        ("controllight", "254"),
        ("window", "0"),
        ("windowtext", "15"),
    ])
});

/// Resolves a colour name to a terminal colour code. Unknown names give
/// `None`.
pub fn color_code(name: &str) -> Option<String> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        let valid = hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit());
        return valid.then(|| name.to_string());
    }
    if name.parse::<u8>().is_ok() {
        return Some(name.to_string());
    }
    NAMED_COLORS
        .get(name.to_ascii_lowercase().as_str())
        .map(|code| code.to_string())
}

/// How lines of one level are displayed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LevelStyle {
    /// Level name, matched case-insensitively (`"warn"`, `"ERROR"`).
    pub level: String,
    /// Text colour name.
    pub foreground: Option<String>,
    /// Background colour name.
    pub background: Option<String>,
    /// Bold text.
    pub bold: bool,
    /// Italic text.
    pub italic: bool,
    /// Font family. Terminals draw every cell in one font, so this is kept
    /// for configuration compatibility only.
    pub font_family: Option<String>,
    /// Font size in points; ignored like `font_family`.
    pub point_size: Option<f32>,
}

impl LevelStyle {
    /// Creates an unstyled mapping for `level`.
    pub fn new(level: Level) -> Self {
        Self {
            level: level.as_str().to_string(),
            ..Self::default()
        }
    }

    /// Sets the text colour.
    pub fn with_foreground(mut self, color: &str) -> Self {
        self.foreground = Some(color.to_string());
        self
    }

    /// Sets the background colour.
    pub fn with_background(mut self, color: &str) -> Self {
        self.background = Some(color.to_string());
        self
    }

    /// Makes the text bold.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Makes the text italic.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    fn applies_to(&self, level: &Level) -> bool {
        self.level.eq_ignore_ascii_case(level.as_str())
    }
}

/// Text attributes after colour names have been resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextAttributes {
    /// Terminal colour code of the text.
    pub foreground: Option<String>,
    /// Terminal colour code of the background.
    pub background: Option<String>,
    /// Bold text.
    pub bold: bool,
    /// Italic text.
    pub italic: bool,
}

impl TextAttributes {
    /// The lipgloss style drawing these attributes.
    pub fn to_style(&self) -> Style {
        let mut style = Style::new();
        if let Some(fg) = &self.foreground {
            style = style.foreground(Color::from(fg.as_str()));
        }
        if let Some(bg) = &self.background {
            style = style.background(Color::from(bg.as_str()));
        }
        if self.bold {
            style = style.bold(true);
        }
        if self.italic {
            style = style.italic(true);
        }
        style
    }
}

/// Ordered level mappings. The first mapping naming a level wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    mappings: Vec<LevelStyle>,
}

impl StyleMap {
    /// Creates a map from mappings.
    pub fn new(mappings: Vec<LevelStyle>) -> Self {
        Self { mappings }
    }

    /// Appends a mapping.
    pub fn add(&mut self, mapping: LevelStyle) {
        self.mappings.push(mapping);
    }

    /// The mappings in lookup order.
    pub fn mappings(&self) -> &[LevelStyle] {
        &self.mappings
    }

    /// Attributes for `level`. Missing mappings and unknown colour names
    /// fall back to the terminal defaults.
    pub fn attributes(&self, level: &Level) -> TextAttributes {
        let Some(mapping) = self.mappings.iter().find(|m| m.applies_to(level)) else {
            return TextAttributes::default();
        };
        TextAttributes {
            foreground: mapping.foreground.as_deref().and_then(color_code),
            background: mapping.background.as_deref().and_then(color_code),
            bold: mapping.bold,
            italic: mapping.italic,
        }
    }

    /// Style for `level`.
    pub fn resolve(&self, level: &Level) -> Style {
        self.attributes(level).to_style()
    }
}

/// A readable default: green debug, blue warnings, bold red errors.
pub fn default_style_map() -> StyleMap {
    StyleMap::new(vec![
        LevelStyle::new(Level::TRACE).with_foreground("gray"),
        LevelStyle::new(Level::DEBUG).with_foreground("DarkGreen"),
        LevelStyle::new(Level::INFO).with_foreground("ControlText"),
        LevelStyle::new(Level::WARN).with_foreground("Blue"),
        LevelStyle::new(Level::ERROR)
            .with_foreground("Red")
            .with_bold(true),
    ])
}
