//! Change-log renderer
//!
//! Formats new history entries as an RPM `.changes` entry.

use chrono::{DateTime, Utc};

use crate::model::{ChangeLogBlock, HistoryEntry, PackageVersion};

/// Line that opens every `.changes` entry
pub const SEPARATOR: &str =
    "-------------------------------------------------------------------";

/// Timestamp format of the entry header, e.g. `Tue Oct  8 07:12:44 UTC 2024`
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S UTC %Y";

const BULLET: &str = "  * ";
const CONTINUATION: &str = "    ";

/// Render a change-log block for `entries` (newest first)
///
/// Returns `None` when there is nothing new. Merge entries are left out of the
/// bullet list but still make the block exist, so a diff made only of merges
/// renders a header with no bullets.
pub fn render(
    entries: &[HistoryEntry],
    version: &PackageVersion,
    email: &str,
    now: DateTime<Utc>,
) -> Option<ChangeLogBlock> {
    if entries.is_empty() {
        return None;
    }

    let mut text = String::new();
    text.push_str(SEPARATOR);
    text.push('\n');
    text.push_str(&format!("{} - {}\n", now.format(TIMESTAMP_FORMAT), email));
    text.push('\n');
    text.push_str(&format!("- Update to version {}:\n", version));

    for entry in entries.iter().filter(|e| !e.is_merge()) {
        push_bullet(&mut text, &entry.message);
    }

    text.push('\n');
    Some(ChangeLogBlock::new(text))
}

fn push_bullet(text: &mut String, message: &str) {
    let mut lines = message.lines().filter(|l| !l.trim().is_empty());

    let Some(first) = lines.next() else {
        return;
    };
    text.push_str(BULLET);
    text.push_str(first);
    text.push('\n');

    for line in lines {
        text.push_str(CONTINUATION);
        text.push_str(line);
        text.push('\n');
    }
}
