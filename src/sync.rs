//! Sync run orchestration
//!
//! One pass, two possible paths:
//! - [`SyncState::Init`]: the spec has no recorded revision yet. Only the spec
//!   fields are patched.
//! - [`SyncState::Update`]: history newer than the recorded revision is written
//!   to the changes file (if there is any), then the spec is patched.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::archive::ArchiveInspector;
use crate::changelog;
use crate::config::Config;
use crate::error::SyncError;
use crate::fetch;
use crate::history::{self, Parser};
use crate::manifest::{self, ManifestUpdate};
use crate::model::{HistoryEntry, PackageVersion};
use crate::store;

/// Which path a run takes, decided from the current spec file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    /// No revision recorded by a previous run
    Init,
    /// Revision recorded by the previous run
    Update { recorded: String },
}

impl SyncState {
    pub fn detect(manifest: &str) -> Self {
        match manifest::recorded_revision(manifest) {
            Some(recorded) => Self::Update { recorded },
            None => Self::Init,
        }
    }
}

/// What a finished run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Initialized {
        version: PackageVersion,
    },
    Updated {
        version: PackageVersion,
        recorded: String,
        /// Entries newer than the recorded revision, merges included
        new_changes: usize,
        changelog_written: bool,
    },
}

impl Outcome {
    pub fn version(&self) -> &PackageVersion {
        match self {
            Self::Initialized { version } | Self::Updated { version, .. } => version,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized { version } => {
                write!(f, "Initialized spec at version {}", version)
            }
            Self::Updated {
                version,
                recorded,
                new_changes,
                changelog_written: true,
            } => write!(
                f,
                "Updated to version {} ({} new change(s) since {})",
                version, new_changes, recorded
            ),
            Self::Updated {
                version, recorded, ..
            } => write!(
                f,
                "Updated to version {} (no changes since {})",
                version, recorded
            ),
        }
    }
}

/// Runs a sync for one package
#[derive(Debug, Clone, Copy)]
pub struct Updater<'a> {
    config: &'a Config,
}

impl<'a> Updater<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Download the archive, then [`apply`](Self::apply) it at the current time
    pub fn run(&self) -> Result<Outcome, SyncError> {
        let archive = self.config.archive_path();
        fetch::download(&self.config.url, &archive)?;
        self.apply(&archive, Utc::now())
    }

    /// Sync the spec and changes files against an archive already on disk
    pub fn apply(&self, archive: &Path, now: DateTime<Utc>) -> Result<Outcome, SyncError> {
        let contents = ArchiveInspector::new(archive).inspect(&self.config.history_file)?;
        let upstream_version = self
            .config
            .version_pattern
            .extract(&contents.top_level_dir)?;
        let latest = Parser::latest_revision(&contents.history)?;
        let version = PackageVersion::compose(&upstream_version, now.timestamp(), &latest);
        debug!(
            top_level_dir = %contents.top_level_dir,
            upstream_version = %upstream_version,
            latest = %latest,
            "inspected archive"
        );

        let manifest_path = self.config.manifest_path();
        let manifest = store::read_text(&manifest_path)?;

        match SyncState::detect(&manifest) {
            SyncState::Init => {
                info!(spec = %manifest_path.display(), "no recorded revision, initializing");
                self.write_manifest(&manifest_path, &manifest, &version, &contents.top_level_dir)?;
                Ok(Outcome::Initialized { version })
            }
            SyncState::Update { recorded } => {
                let entries: Vec<HistoryEntry> = Parser::parse_history(&contents.history).collect();
                let new = history::new_entries(&entries, &recorded);
                info!(
                    recorded = %recorded,
                    parsed = entries.len(),
                    new = new.len(),
                    "computed new history entries"
                );

                let changelog_written =
                    match changelog::render(new, &version, &self.config.email, now) {
                        Some(block) => {
                            store::prepend(&self.config.changes_path(), block.as_str())?;
                            info!(
                                changes = %self.config.changes_path().display(),
                                bullets = block.bullet_count(),
                                "prepended changes entry"
                            );
                            true
                        }
                        None => false,
                    };

                self.write_manifest(&manifest_path, &manifest, &version, &contents.top_level_dir)?;
                Ok(Outcome::Updated {
                    version,
                    recorded,
                    new_changes: new.len(),
                    changelog_written,
                })
            }
        }
    }

    fn write_manifest(
        &self,
        path: &Path,
        manifest: &str,
        version: &PackageVersion,
        setup_dir: &str,
    ) -> Result<(), SyncError> {
        let patch = manifest::patch_manifest(
            manifest,
            &ManifestUpdate {
                version,
                source: &self.config.filename,
                setup_dir,
            },
        );

        for (patched, field) in [
            (patch.version_patched, "Version"),
            (patch.source_patched, "Source"),
            (patch.setup_patched, "%setup -n"),
        ] {
            if !patched {
                warn!(spec = %path.display(), field, "field not found, left unchanged");
            }
        }

        store::write_atomic(path, patch.text.as_bytes())
    }
}
