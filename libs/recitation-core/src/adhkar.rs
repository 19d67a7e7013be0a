//! Adhkar text cleanup.

use crate::types::AdhkarEntry;

/// Normalize supplication text from the source dataset.
///
/// Literal `\n` escapes and commas become spaces, quotes are dropped, and
/// whitespace is collapsed.
pub fn clean_text(text: &str) -> String {
    text.replace("\\n", " ")
        .replace(&['"', '\''][..], "")
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether an entry has enough content to display.
pub fn is_valid_entry(entry: &AdhkarEntry) -> bool {
    clean_text(&entry.content).chars().count() > 2
}

/// Keep valid entries, with their content and translation cleaned.
pub fn clean_entries(entries: Vec<AdhkarEntry>) -> Vec<AdhkarEntry> {
    entries
        .into_iter()
        .filter(is_valid_entry)
        .map(|mut entry| {
            entry.content = clean_text(&entry.content);
            entry.translation = entry.translation.as_deref().map(clean_text);
            entry
        })
        .collect()
}
