//! Triggers decide when the popup is shown, hidden or committed.
//!
//! Every text change and every command key is offered to a [`TriggerChain`].
//! The first trigger with an opinion wins; a chain where nobody has an
//! opinion yields [`TriggerState::None`].

use crate::key::KeyPress;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::Deserialize;

/// The verdict a trigger returns for an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TriggerState {
    /// No opinion; keep asking the remaining triggers.
    #[default]
    None,
    /// Show the popup.
    Show,
    /// Show the popup and swallow the key.
    ShowAndConsume,
    /// Hide the popup.
    Hide,
    /// Hide the popup and swallow the key.
    HideAndConsume,
    /// Commit the selected entry.
    Select,
    /// Commit the selected entry and swallow the key.
    SelectAndConsume,
}

/// The action part of a [`TriggerState`], without the consume flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    /// Nothing to do.
    None,
    /// Show or refresh the popup.
    Show,
    /// Hide the popup.
    Hide,
    /// Commit the current selection.
    Select,
}

impl TriggerState {
    /// Reports whether the host should suppress its default handling of the key.
    pub fn is_consumed(self) -> bool {
        matches!(
            self,
            TriggerState::ShowAndConsume
                | TriggerState::HideAndConsume
                | TriggerState::SelectAndConsume
        )
    }

    /// Returns the action requested by this verdict.
    pub fn action(self) -> TriggerAction {
        match self {
            TriggerState::None => TriggerAction::None,
            TriggerState::Show | TriggerState::ShowAndConsume => TriggerAction::Show,
            TriggerState::Hide | TriggerState::HideAndConsume => TriggerAction::Hide,
            TriggerState::Select | TriggerState::SelectAndConsume => TriggerAction::Select,
        }
    }
}

/// A single rule mapping input events to verdicts.
///
/// In configuration files triggers are tagged by `kind`:
///
/// ```toml
/// [[triggers]]
/// kind = "text_length"
/// threshold = 3
///
/// [[triggers]]
/// kind = "shortcut"
/// key = "ctrl+space"
/// state = "ShowAndConsume"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Shows the popup once the text has at least `threshold` characters and
    /// hides it below that.
    TextLength {
        /// Minimum number of characters (not bytes).
        threshold: usize,
    },
    /// Returns `state` when exactly `key` is pressed.
    Shortcut {
        /// The key combination to react to.
        key: KeyPress,
        /// The verdict to return.
        state: TriggerState,
    },
}

impl Trigger {
    /// Creates a text length trigger.
    pub fn text_length(threshold: usize) -> Self {
        Trigger::TextLength { threshold }
    }

    /// Creates a shortcut trigger.
    pub fn shortcut(key: impl Into<KeyPress>, state: TriggerState) -> Self {
        Trigger::Shortcut {
            key: key.into(),
            state,
        }
    }

    /// Verdict for a change of the input text.
    pub fn on_text_changed(&self, text: &str) -> TriggerState {
        match self {
            Trigger::TextLength { threshold } => {
                if text.chars().count() >= *threshold {
                    TriggerState::Show
                } else {
                    TriggerState::Hide
                }
            }
            Trigger::Shortcut { .. } => TriggerState::None,
        }
    }

    /// Verdict for a command key press.
    pub fn on_command_key(&self, key: &KeyPress) -> TriggerState {
        match self {
            Trigger::Shortcut { key: shortcut, state } if shortcut == key => *state,
            _ => TriggerState::None,
        }
    }
}

/// An ordered list of triggers evaluated first-match-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerChain {
    triggers: Vec<Trigger>,
}

impl TriggerChain {
    /// Creates an empty chain. An empty chain never has an opinion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a trigger and returns the chain.
    pub fn with(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Appends a trigger.
    pub fn push(&mut self, trigger: Trigger) {
        self.triggers.push(trigger);
    }

    /// Inserts a trigger at `index`, shifting later triggers back.
    /// Indices past the end append.
    pub fn insert(&mut self, index: usize, trigger: Trigger) {
        let index = index.min(self.triggers.len());
        self.triggers.insert(index, trigger);
    }

    /// Removes and returns the trigger at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Trigger> {
        (index < self.triggers.len()).then(|| self.triggers.remove(index))
    }

    /// Removes all triggers.
    pub fn clear(&mut self) {
        self.triggers.clear();
    }

    /// Number of triggers.
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// Reports whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Iterates over the triggers in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Trigger> {
        self.triggers.iter()
    }

    /// Verdict of the chain for a change of the input text.
    pub fn on_text_changed(&self, text: &str) -> TriggerState {
        self.evaluate(|trigger| trigger.on_text_changed(text))
    }

    /// Verdict of the chain for a command key press.
    pub fn on_command_key(&self, key: &KeyPress) -> TriggerState {
        self.evaluate(|trigger| trigger.on_command_key(key))
    }

    /// Runs `probe` over the triggers in order and returns the first verdict
    /// other than [`TriggerState::None`]. Later triggers are not probed.
    pub fn evaluate(&self, mut probe: impl FnMut(&Trigger) -> TriggerState) -> TriggerState {
        for trigger in &self.triggers {
            let state = probe(trigger);
            if state != TriggerState::None {
                return state;
            }
        }
        TriggerState::None
    }
}

impl FromIterator<Trigger> for TriggerChain {
    fn from_iter<I: IntoIterator<Item = Trigger>>(iter: I) -> Self {
        Self {
            triggers: iter.into_iter().collect(),
        }
    }
}

/// The chain installed on a new autocomplete input.
///
/// In order: show from two characters on, `enter` commits and is swallowed,
/// `tab` commits and still moves focus, `ctrl+space` forces the popup open and
/// `esc` closes it.
pub fn default_chain() -> TriggerChain {
    TriggerChain::new()
        .with(Trigger::text_length(2))
        .with(Trigger::shortcut(KeyCode::Enter, TriggerState::SelectAndConsume))
        .with(Trigger::shortcut(KeyCode::Tab, TriggerState::Select))
        .with(Trigger::shortcut(
            (KeyCode::Char(' '), KeyModifiers::CONTROL),
            TriggerState::ShowAndConsume,
        ))
        .with(Trigger::shortcut(KeyCode::Esc, TriggerState::HideAndConsume))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn text_length_counts_characters() {
        let trigger = Trigger::text_length(2);
        assert_eq!(trigger.on_text_changed(""), TriggerState::Hide);
        assert_eq!(trigger.on_text_changed("é"), TriggerState::Hide);
        assert_eq!(trigger.on_text_changed("éa"), TriggerState::Show);
        assert_eq!(trigger.on_text_changed("abc"), TriggerState::Show);
        assert_eq!(
            trigger.on_command_key(&KeyPress::plain(KeyCode::Enter)),
            TriggerState::None
        );
    }

    #[test]
    fn shortcut_matches_exact_combination() {
        let trigger = Trigger::shortcut(
            (KeyCode::Char(' '), KeyModifiers::CONTROL),
            TriggerState::ShowAndConsume,
        );
        assert_eq!(
            trigger.on_command_key(&KeyPress::new(KeyCode::Char(' '), KeyModifiers::CONTROL)),
            TriggerState::ShowAndConsume
        );
        assert_eq!(
            trigger.on_command_key(&KeyPress::plain(KeyCode::Char(' '))),
            TriggerState::None
        );
        assert_eq!(trigger.on_text_changed("anything"), TriggerState::None);
    }

    #[test]
    fn empty_chain_is_neutral() {
        let chain = TriggerChain::new();
        assert_eq!(chain.on_text_changed("abc"), TriggerState::None);
        assert_eq!(
            chain.on_command_key(&KeyPress::plain(KeyCode::Enter)),
            TriggerState::None
        );
    }

    #[test]
    fn first_opinion_wins_and_stops_evaluation() {
        let chain: TriggerChain = vec![
            Trigger::shortcut(KeyCode::Esc, TriggerState::Hide),
            Trigger::shortcut(KeyCode::Enter, TriggerState::SelectAndConsume),
            Trigger::shortcut(KeyCode::Enter, TriggerState::Show),
            Trigger::text_length(1),
        ]
        .into_iter()
        .collect();

        let calls = Cell::new(0);
        let enter = KeyPress::plain(KeyCode::Enter);
        let verdict = chain.evaluate(|trigger| {
            calls.set(calls.get() + 1);
            trigger.on_command_key(&enter)
        });

        assert_eq!(verdict, TriggerState::SelectAndConsume);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn all_neutral_probes_every_trigger() {
        let chain: TriggerChain = (0..4)
            .map(|_| Trigger::shortcut(KeyCode::F(1), TriggerState::Show))
            .collect();
        let calls = Cell::new(0);
        let verdict = chain.evaluate(|trigger| {
            calls.set(calls.get() + 1);
            trigger.on_command_key(&KeyPress::plain(KeyCode::F(2)))
        });
        assert_eq!(verdict, TriggerState::None);
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn default_chain_verdicts() {
        let chain = default_chain();
        assert_eq!(chain.len(), 5);
        assert_eq!(chain.on_text_changed("a"), TriggerState::Hide);
        assert_eq!(chain.on_text_changed("ab"), TriggerState::Show);
        assert_eq!(
            chain.on_command_key(&KeyPress::plain(KeyCode::Enter)),
            TriggerState::SelectAndConsume
        );
        assert_eq!(
            chain.on_command_key(&KeyPress::plain(KeyCode::Tab)),
            TriggerState::Select
        );
        assert_eq!(
            chain.on_command_key(&KeyPress::new(KeyCode::Char(' '), KeyModifiers::CONTROL)),
            TriggerState::ShowAndConsume
        );
        assert_eq!(
            chain.on_command_key(&KeyPress::plain(KeyCode::Esc)),
            TriggerState::HideAndConsume
        );
        assert_eq!(
            chain.on_command_key(&KeyPress::plain(KeyCode::Char('x'))),
            TriggerState::None
        );
    }

    #[test]
    fn consume_flags() {
        assert!(TriggerState::ShowAndConsume.is_consumed());
        assert!(TriggerState::HideAndConsume.is_consumed());
        assert!(TriggerState::SelectAndConsume.is_consumed());
        assert!(!TriggerState::Select.is_consumed());
        assert!(!TriggerState::None.is_consumed());
        assert_eq!(TriggerState::SelectAndConsume.action(), TriggerAction::Select);
    }

    #[test]
    fn chain_editing() {
        let mut chain = default_chain();
        chain.insert(0, Trigger::shortcut(KeyCode::Enter, TriggerState::Hide));
        assert_eq!(
            chain.on_command_key(&KeyPress::plain(KeyCode::Enter)),
            TriggerState::Hide
        );
        assert_eq!(
            chain.remove(0),
            Some(Trigger::shortcut(KeyCode::Enter, TriggerState::Hide))
        );
        assert!(chain.remove(42).is_none());
        chain.clear();
        assert!(chain.is_empty());
    }
}
