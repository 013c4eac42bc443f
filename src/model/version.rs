//! Package version data model

use std::fmt;

/// Number of revision characters kept in a package version
pub const SHORT_REVISION_LEN: usize = 7;

/// Separator between the upstream version and the snapshot suffix
pub const SNAPSHOT_INFIX: &str = "+git.";

/// Version string stamped into the manifest:
/// `<upstream_version>+git.<unix_timestamp>.<short_revision>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageVersion(String);

impl PackageVersion {
    /// Compose a package version
    ///
    /// `revision` is cut to its first [`SHORT_REVISION_LEN`] characters. A shorter
    /// revision is used as-is, never padded.
    pub fn compose(upstream_version: &str, timestamp: i64, revision: &str) -> Self {
        Self(format!(
            "{}{}{}.{}",
            upstream_version,
            SNAPSHOT_INFIX,
            timestamp,
            short_revision(revision)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First [`SHORT_REVISION_LEN`] characters of `revision`
pub fn short_revision(revision: &str) -> &str {
    match revision.char_indices().nth(SHORT_REVISION_LEN) {
        Some((end, _)) => &revision[..end],
        None => revision,
    }
}
