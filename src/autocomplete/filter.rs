//! Prefix filtering of autocomplete entries.

use super::entry::EntryCollection;

/// Returns the entries having at least one match string that starts with
/// `text`, ignoring case. Source order is preserved and the empty string
/// matches every entry.
///
/// # Examples
///
/// ```rust
/// use bubbletea_autocomplete::autocomplete::{filter_entries, Entry, EntryCollection};
///
/// let entries: EntryCollection = ["Apple", "Banana", "Apricot"]
///     .into_iter()
///     .map(|s| Entry::new(s).unwrap())
///     .collect();
///
/// let matched = filter_entries("AP", &entries);
/// let names: Vec<&str> = matched.iter().map(|e| e.display()).collect();
/// assert_eq!(names, ["Apple", "Apricot"]);
/// ```
pub fn filter_entries(text: &str, entries: &EntryCollection) -> EntryCollection {
    if text.is_empty() {
        return entries.clone();
    }

    let needle = text.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            entry
                .matches()
                .iter()
                .any(|candidate| candidate.to_lowercase().starts_with(&needle))
        })
        .cloned()
        .collect()
}
