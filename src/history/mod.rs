//! Revision history handling
//!
//! Parses the `git log` text shipped inside an upstream snapshot and works out
//! which entries are new since the last sync.

pub mod constants;
mod diff;
/// Parser module (public for integration testing)
pub mod parser;

pub use diff::new_entries;
pub use parser::{HistoryEntries, Parser};
