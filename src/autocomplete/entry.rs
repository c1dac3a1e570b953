//! Candidate entries offered by the autocomplete popup.

use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// An immutable autocomplete candidate.
///
/// The display string is what the popup shows and what gets written into the
/// text input when the entry is committed. The match strings are what user
/// input is tested against; they default to the display string.
///
/// # Examples
///
/// ```rust
/// use bubbletea_autocomplete::autocomplete::Entry;
///
/// let entry = Entry::with_matches("United Kingdom", ["uk", "united kingdom", "britain"]).unwrap();
/// assert_eq!(entry.display(), "United Kingdom");
/// assert_eq!(entry.matches().len(), 3);
///
/// let plain = Entry::new("Apple").unwrap();
/// assert_eq!(plain.matches(), ["Apple"]);
/// ```
///
/// `PartialEq` compares values. The popup tracks its highlighted entry by
/// `Arc` identity, so two equal entries in one collection are still
/// different rows; see [`EntryCollection::position_of`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    display: String,
    matches: Vec<String>,
}

impl Entry {
    /// Creates an entry that matches on its own display string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDisplay`] if `display` is empty.
    pub fn new(display: impl Into<String>) -> Result<Self> {
        Self::with_matches(display, std::iter::empty::<String>())
    }

    /// Creates an entry with explicit match strings. An empty match list falls
    /// back to the display string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDisplay`] if `display` is empty.
    pub fn with_matches<S: Into<String>>(
        display: impl Into<String>,
        matches: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let display = display.into();
        if display.is_empty() {
            return Err(Error::EmptyDisplay);
        }
        let mut matches: Vec<String> = matches.into_iter().map(Into::into).collect();
        if matches.is_empty() {
            matches.push(display.clone());
        }
        Ok(Self { display, matches })
    }

    /// The text shown in the popup and committed into the input.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The strings tested against user input. Never empty.
    pub fn matches(&self) -> &[String] {
        &self.matches
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// An ordered collection of shared entries.
///
/// Entries are held behind [`Arc`] so the filtered view and the selection can
/// refer to the very same candidate; selection tracking compares identity,
/// not value. Duplicates are allowed.
#[derive(Debug, Clone, Default)]
pub struct EntryCollection {
    entries: Vec<Arc<Entry>>,
}

impl EntryCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: impl Into<Arc<Entry>>) {
        self.entries.push(entry.into());
    }

    /// Appends every entry from `iter`.
    pub fn extend<E: Into<Arc<Entry>>>(&mut self, iter: impl IntoIterator<Item = E>) {
        self.entries.extend(iter.into_iter().map(Into::into));
    }

    /// Removes and returns the entry at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<Arc<Entry>> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index`.
    pub fn get(&self, index: usize) -> Option<&Arc<Entry>> {
        self.entries.get(index)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Entry>> {
        self.entries.iter()
    }

    /// Returns the entries as a slice.
    pub fn as_slice(&self) -> &[Arc<Entry>] {
        &self.entries
    }

    /// Finds the position of this exact entry (by identity).
    pub fn position_of(&self, entry: &Arc<Entry>) -> Option<usize> {
        self.entries.iter().position(|e| Arc::ptr_eq(e, entry))
    }
}

impl<E: Into<Arc<Entry>>> FromIterator<E> for EntryCollection {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EntryCollection {
    type Item = &'a Arc<Entry>;
    type IntoIter = std::slice::Iter<'a, Arc<Entry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_display_is_rejected() {
        assert!(matches!(Entry::new(""), Err(Error::EmptyDisplay)));
        assert!(matches!(
            Entry::with_matches("", ["x"]),
            Err(Error::EmptyDisplay)
        ));
    }

    #[test]
    fn matches_default_to_display() {
        let entry = Entry::with_matches("Apple", Vec::<String>::new()).unwrap();
        assert_eq!(entry.matches(), ["Apple"]);
        assert_eq!(entry.to_string(), "Apple");
    }

    #[test]
    fn position_uses_identity_not_value() {
        let a = Arc::new(Entry::new("Same").unwrap());
        let b = Arc::new(Entry::new("Same").unwrap());
        let collection: EntryCollection = vec![a.clone(), b.clone()].into_iter().collect();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.position_of(&b), Some(1));
        assert_eq!(collection.position_of(&a), Some(0));

        let stranger = Arc::new(Entry::new("Same").unwrap());
        assert_eq!(collection.position_of(&stranger), None);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut collection = EntryCollection::new();
        collection.push(Entry::new("One").unwrap());
        assert!(collection.remove(3).is_none());
        assert!(collection.remove(0).is_some());
        assert!(collection.is_empty());
    }
}
