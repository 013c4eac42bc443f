//! Error type shared by every stage of a sync run

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a sync run
///
/// None of these are retried; the binary reports the message and exits non-zero.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Failed to download {url}")]
    Transfer {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid archive URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Revision history file '{file}' not found in archive {archive}")]
    MissingHistory { file: String, archive: PathBuf },

    #[error("Version pattern '{pattern}' {reason}")]
    VersionPattern { pattern: String, reason: String },

    #[error("No 'commit <revision>' header found in revision history")]
    MissingRevision,

    #[error("Cannot derive a package name from {0}; pass --package")]
    UnknownPackage(PathBuf),

    #[error("Archive {0} contains no entries")]
    EmptyArchive(PathBuf),

    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::VersionPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
