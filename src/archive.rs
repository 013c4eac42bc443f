//! Upstream archive inspection
//!
//! Reads a (compressed) tarball and pulls out what a sync needs: the top-level
//! directory name and the revision history text.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Component, Path, PathBuf};

use tar::EntryType;
use tracing::debug;

use crate::error::SyncError;

/// Compression of a tarball, chosen from its file name
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Xz,
    Bzip2,
}

impl Compression {
    /// Guess compression from the file suffix, defaulting to gzip
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        if name.ends_with(".tar.xz") || name.ends_with(".txz") {
            Self::Xz
        } else if name.ends_with(".tar.bz2") || name.ends_with(".tbz2") || name.ends_with(".tbz") {
            Self::Bzip2
        } else if name.ends_with(".tar") {
            Self::None
        } else {
            Self::Gzip
        }
    }

    fn decoder<'a>(self, reader: impl Read + 'a) -> Box<dyn Read + 'a> {
        match self {
            Self::None => Box::new(reader),
            Self::Gzip => Box::new(flate2::read::GzDecoder::new(reader)),
            Self::Xz => Box::new(xz2::read::XzDecoder::new(reader)),
            Self::Bzip2 => Box::new(bzip2::read::BzDecoder::new(reader)),
        }
    }
}

/// What a sync needs from the upstream archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveContents {
    /// Name of the directory every entry lives under
    pub top_level_dir: String,
    /// Text of the revision history file
    pub history: String,
}

/// Reads [`ArchiveContents`] out of a tarball on disk
#[derive(Debug, Clone)]
pub struct ArchiveInspector {
    path: PathBuf,
    compression: Compression,
}

impl ArchiveInspector {
    /// Inspector for the archive at `path`, compression guessed from the name
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let compression = Compression::from_path(&path);
        Self { path, compression }
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Find the top-level directory and read `history_file` (relative to it)
    pub fn inspect(&self, history_file: &str) -> Result<ArchiveContents, SyncError> {
        let io_err = |e| SyncError::io(&self.path, e);

        let file = File::open(&self.path).map_err(io_err)?;
        let mut archive = tar::Archive::new(self.compression.decoder(BufReader::new(file)));

        let wanted = Path::new(history_file);
        let mut top_level_dir: Option<String> = None;

        for entry in archive.entries().map_err(io_err)? {
            let mut entry = entry.map_err(io_err)?;

            if matches!(
                entry.header().entry_type(),
                EntryType::XGlobalHeader | EntryType::XHeader
            ) {
                continue;
            }

            let path = entry.path().map_err(io_err)?.into_owned();
            let mut components = path.components().filter_map(|c| match c {
                Component::Normal(name) => Some(name),
                _ => None,
            });

            let Some(first) = components.next() else {
                continue;
            };
            let top = top_level_dir.get_or_insert_with(|| {
                let top = first.to_string_lossy().into_owned();
                debug!(archive = %self.path.display(), top_level_dir = %top, "found archive root");
                top
            });
            if first.to_string_lossy() != top.as_str() {
                continue;
            }

            let rest: PathBuf = components.collect();
            if rest.as_path() == wanted {
                let mut data = Vec::new();
                entry.read_to_end(&mut data).map_err(io_err)?;

                return Ok(ArchiveContents {
                    top_level_dir: top.clone(),
                    history: String::from_utf8_lossy(&data).into_owned(),
                });
            }
        }

        match top_level_dir {
            Some(_) => Err(SyncError::MissingHistory {
                file: history_file.to_string(),
                archive: self.path.clone(),
            }),
            None => Err(SyncError::EmptyArchive(self.path.clone())),
        }
    }
}
