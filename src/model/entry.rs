//! Revision history entry data model

/// Message prefix that marks a merge commit
pub const MERGE_MARKER: &str = "Merge ";

/// One logged upstream change (a `git log` block)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryEntry {
    /// Full revision identifier (commit hash)
    pub revision: String,

    /// Author line as written in the log (`Name <email>`)
    pub author: String,

    /// Date line, kept as free text
    pub date: String,

    /// De-indented commit message, possibly spanning several lines
    pub message: String,
}

impl HistoryEntry {
    /// Does this entry's revision start with `recorded`?
    ///
    /// Recorded revisions are usually abbreviated to a few characters.
    pub fn matches_revision(&self, recorded: &str) -> bool {
        self.revision.starts_with(recorded)
    }

    /// Is this a merge commit (message begins with the merge marker)?
    pub fn is_merge(&self) -> bool {
        self.message.starts_with(MERGE_MARKER)
    }
}
