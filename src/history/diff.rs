//! Change set differ
//!
//! Finds the history entries newer than the recorded revision.

use crate::model::HistoryEntry;

/// Entries strictly newer than `recorded`
///
/// `entries` is newest first. The walk stops at the first entry whose revision
/// starts with `recorded`; that entry is excluded. When nothing matches, every
/// entry counts as new (the recorded revision may have been rewritten upstream).
///
/// An empty `recorded` matches the newest entry, so the result is empty.
pub fn new_entries<'a>(entries: &'a [HistoryEntry], recorded: &str) -> &'a [HistoryEntry] {
    let end = entries
        .iter()
        .position(|entry| entry.matches_revision(recorded))
        .unwrap_or(entries.len());
    &entries[..end]
}
