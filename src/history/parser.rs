//! Revision history parser (`git log` default format)
//!
//! Grammar, one block per change, newest first:
//!
//! ```text
//! commit <revision> [decorations]
//! [Merge: <parents>]
//! Author: <author>
//! Date:   <date>
//!
//!     <message line>
//!     ...
//! ```
//!
//! Blocks that do not follow the grammar are skipped.

use std::iter::Peekable;
use std::str::Lines;

use super::constants::prefixes;
use crate::error::SyncError;
use crate::model::HistoryEntry;

/// Parser for revision history text
pub struct Parser;

impl Parser {
    /// Parse revision history text into entries, in input order
    ///
    /// The returned iterator is lazy and can be cloned to restart from its
    /// current position.
    pub fn parse_history(text: &str) -> HistoryEntries<'_> {
        HistoryEntries {
            lines: text.lines().peekable(),
        }
    }

    /// Revision identifier of the first `commit` header in `text`
    pub fn latest_revision(text: &str) -> Result<String, SyncError> {
        text.lines()
            .find_map(Self::parse_header)
            .map(str::to_string)
            .ok_or(SyncError::MissingRevision)
    }

    /// Extract the revision from a header line
    ///
    /// Input: "commit 3f2a9c1d8e7b (HEAD -> main)"
    /// Output: Some("3f2a9c1d8e7b")
    pub(super) fn parse_header(line: &str) -> Option<&str> {
        let revision = line
            .strip_prefix(prefixes::COMMIT)?
            .split_whitespace()
            .next()?;

        revision
            .bytes()
            .all(|b| b.is_ascii_hexdigit())
            .then_some(revision)
    }

    /// Strip message indentation, `None` if the line is not indented
    fn message_line(line: &str) -> Option<&str> {
        line.strip_prefix(prefixes::MESSAGE_INDENT)
            .or_else(|| line.strip_prefix(prefixes::MESSAGE_INDENT_TAB))
    }
}

/// Lazy iterator over the entries of a revision history
#[derive(Debug, Clone)]
pub struct HistoryEntries<'a> {
    lines: Peekable<Lines<'a>>,
}

impl<'a> HistoryEntries<'a> {
    /// Consume the next line if it starts with `prefix`, returning the trimmed rest
    ///
    /// A non-matching line is left in place so a following header is not lost.
    fn field(&mut self, prefix: &str) -> Option<&'a str> {
        let value = self.lines.peek()?.strip_prefix(prefix)?.trim();
        self.lines.next();
        Some(value)
    }

    /// Parse the rest of a block after its header
    fn parse_block(&mut self, revision: &str) -> Option<HistoryEntry> {
        self.field(prefixes::MERGE_PARENTS);

        let author = self.field(prefixes::AUTHOR)?;
        let date = self.field(prefixes::DATE)?;

        if !self.lines.peek()?.trim().is_empty() {
            return None;
        }
        self.lines.next();

        let mut message: Vec<&str> = Vec::new();
        while let Some(&line) = self.lines.peek() {
            if let Some(text) = Parser::message_line(line) {
                message.push(text.trim_end());
            } else if line.trim().is_empty() {
                message.push("");
            } else {
                break;
            }
            self.lines.next();
        }

        while message.last().is_some_and(|l| l.is_empty()) {
            message.pop();
        }
        if message.is_empty() {
            return None;
        }

        Some(HistoryEntry {
            revision: revision.to_string(),
            author: author.to_string(),
            date: date.to_string(),
            message: message.join("\n"),
        })
    }
}

impl Iterator for HistoryEntries<'_> {
    type Item = HistoryEntry;

    fn next(&mut self) -> Option<HistoryEntry> {
        loop {
            let revision = loop {
                let line = self.lines.next()?;
                if let Some(revision) = Parser::parse_header(line) {
                    break revision;
                }
            };

            if let Some(entry) = self.parse_block(revision) {
                return Some(entry);
            }
        }
    }
}
