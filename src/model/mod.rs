//! Data models for Specbump
//!
//! Plain values passed between the parsing, diffing and rendering stages.

mod changelog;
mod entry;
pub mod version;

pub use changelog::ChangeLogBlock;
pub use entry::{HistoryEntry, MERGE_MARKER};
pub use version::PackageVersion;
