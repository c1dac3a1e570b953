//! Key combinations and bindings.
//!
//! A [`KeyPress`] is a single key code together with the exact set of
//! modifiers held while it was pressed. Shortcut triggers compare key presses
//! for equality, so `ctrl+space` never matches a plain `space`.
//!
//! Key presses can be written as strings, which is how they appear in
//! configuration files:
//!
//! ```rust
//! use bubbletea_autocomplete::key::KeyPress;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let key: KeyPress = "ctrl+space".parse().unwrap();
//! assert_eq!(key, KeyPress::new(KeyCode::Char(' '), KeyModifiers::CONTROL));
//! assert_eq!(key.to_string(), "ctrl+space");
//! ```

use crate::error::Error;
use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};
use std::fmt;
use std::str::FromStr;

/// A key code plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(try_from = "String")]
pub struct KeyPress {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifiers held while the key was pressed.
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    /// Creates a key press from a code and modifier set.
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Creates a key press with no modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self::plain(code)
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self::new(code, modifiers)
    }
}

impl From<&KeyMsg> for KeyPress {
    fn from(msg: &KeyMsg) -> Self {
        Self::new(msg.key, msg.modifiers)
    }
}

impl FromStr for KeyPress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidKey(s.to_string());
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        // "ctrl++" and "+" name the plus key itself.
        let (prefix, key_name) = match trimmed.strip_suffix("++") {
            Some(rest) => (rest, "+"),
            None if trimmed == "+" => ("", "+"),
            None => match trimmed.rsplit_once('+') {
                Some((rest, name)) => (rest, name),
                None => ("", trimmed),
            },
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in prefix.split('+').filter(|p| !p.is_empty()) {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "option" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(invalid()),
            };
        }

        let code = parse_key_code(key_name).ok_or_else(invalid)?;
        Ok(Self::new(code, modifiers))
    }
}

impl TryFrom<String> for KeyPress {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn parse_key_code(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(ch));
    }

    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pgup" | "pageup" => KeyCode::PageUp,
        "pgdown" | "pagedown" => KeyCode::PageDown,
        _ => {
            let n: u8 = lower.strip_prefix('f')?.parse().ok()?;
            if (1..=24).contains(&n) {
                KeyCode::F(n)
            } else {
                return None;
            }
        }
    };
    Some(code)
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::BackTab => f.write_str("backtab"),
            KeyCode::Esc => f.write_str("esc"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Delete => f.write_str("delete"),
            KeyCode::Insert => f.write_str("insert"),
            KeyCode::Up => f.write_str("up"),
            KeyCode::Down => f.write_str("down"),
            KeyCode::Left => f.write_str("left"),
            KeyCode::Right => f.write_str("right"),
            KeyCode::Home => f.write_str("home"),
            KeyCode::End => f.write_str("end"),
            KeyCode::PageUp => f.write_str("pgup"),
            KeyCode::PageDown => f.write_str("pgdown"),
            KeyCode::F(n) => write!(f, "f{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// A set of key presses that all trigger the same action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    keys: Vec<KeyPress>,
    enabled: bool,
}

impl Binding {
    /// Creates an enabled binding for the given key presses.
    pub fn new<K: Into<KeyPress>>(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            enabled: true,
        }
    }

    /// Creates a binding from key strings such as `"ctrl+n"`.
    pub fn from_strs(keys: &[&str]) -> crate::Result<Self> {
        let keys = keys
            .iter()
            .map(|k| k.parse::<KeyPress>())
            .collect::<crate::Result<Vec<_>>>()?;
        Ok(Self::new(keys))
    }

    /// Returns the key presses in this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Enables or disables the binding. Disabled bindings never match.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns whether the binding is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Reports whether `key` is one of this binding's key presses.
    pub fn matches(&self, key: &KeyPress) -> bool {
        self.enabled && self.keys.contains(key)
    }

    /// Reports whether a bubbletea key message matches this binding.
    pub fn matches_msg(&self, msg: &KeyMsg) -> bool {
        self.matches(&KeyPress::from(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_keys_and_modifiers() {
        let key: KeyPress = "ctrl+space".parse().unwrap();
        assert_eq!(key, KeyPress::new(KeyCode::Char(' '), KeyModifiers::CONTROL));

        let key: KeyPress = "Enter".parse().unwrap();
        assert_eq!(key, KeyPress::plain(KeyCode::Enter));

        let key: KeyPress = "ctrl+alt+f5".parse().unwrap();
        assert_eq!(
            key,
            KeyPress::new(KeyCode::F(5), KeyModifiers::CONTROL | KeyModifiers::ALT)
        );

        let key: KeyPress = "ctrl++".parse().unwrap();
        assert_eq!(key, KeyPress::new(KeyCode::Char('+'), KeyModifiers::CONTROL));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!("".parse::<KeyPress>(), Err(Error::InvalidKey(_))));
        assert!(matches!("hyper+x".parse::<KeyPress>(), Err(Error::InvalidKey(_))));
        assert!(matches!("f99".parse::<KeyPress>(), Err(Error::InvalidKey(_))));
        assert!(matches!("banana".parse::<KeyPress>(), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for s in ["ctrl+space", "esc", "tab", "alt+shift+x", "f12", "down"] {
            let key: KeyPress = s.parse().unwrap();
            assert_eq!(key.to_string(), s);
        }
    }

    #[test]
    fn binding_requires_exact_modifiers() {
        let binding = Binding::new([KeyCode::Up]);
        assert!(binding.matches(&KeyPress::plain(KeyCode::Up)));
        assert!(!binding.matches(&KeyPress::new(KeyCode::Up, KeyModifiers::SHIFT)));

        let msg = KeyMsg {
            key: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
        };
        assert!(binding.matches_msg(&msg));
    }

    #[test]
    fn disabled_binding_never_matches() {
        let mut binding = Binding::from_strs(&["ctrl+n", "down"]).unwrap();
        assert_eq!(binding.keys().len(), 2);
        binding.set_enabled(false);
        assert!(!binding.matches(&KeyPress::plain(KeyCode::Down)));
    }
}
