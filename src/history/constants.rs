//! Revision history constants
//!
//! Line prefixes of the default `git log` output format.

/// Line prefixes that make up one history block
pub mod prefixes {
    /// Block header, followed by the full revision identifier
    pub const COMMIT: &str = "commit ";
    /// Optional parents line of a merge commit
    pub const MERGE_PARENTS: &str = "Merge:";
    pub const AUTHOR: &str = "Author:";
    pub const DATE: &str = "Date:";
    /// Indentation of message lines
    pub const MESSAGE_INDENT: &str = "    ";
    /// Alternative indentation accepted for message lines
    pub const MESSAGE_INDENT_TAB: char = '\t';
}
