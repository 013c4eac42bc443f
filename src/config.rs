//! Run configuration
//!
//! Command-line options are resolved once into a [`Config`] that is handed to
//! every stage of the run.

use std::path::{Path, PathBuf};

use regex::Regex;
use url::Url;

use crate::error::SyncError;

/// Default pattern extracting the upstream version from the archive directory
pub const DEFAULT_VERSION_REGEXP: &str = ".*-([^-]+)";

/// Default revision history file name inside the archive
pub const DEFAULT_HISTORY_FILE: &str = "ChangeLog";

pub const MANIFEST_EXTENSION: &str = "spec";
pub const CHANGES_EXTENSION: &str = "changes";

/// Unresolved options, as given on the command line
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub url: String,
    pub filename: Option<String>,
    pub package: Option<String>,
    pub email: String,
    pub version_regexp: Option<String>,
    pub history_file: Option<String>,
    pub package_dir: Option<PathBuf>,
    /// Accepted for compatibility with source service hosts, unused
    pub outdir: Option<PathBuf>,
}

/// Resolved configuration for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    /// Local file name of the downloaded archive
    pub filename: String,
    pub package: String,
    pub email: String,
    pub version_pattern: VersionPattern,
    pub history_file: String,
    pub package_dir: PathBuf,
    pub outdir: Option<PathBuf>,
}

impl Config {
    /// Resolve defaults and validate `options`
    ///
    /// The version pattern is compiled and checked here, before anything is
    /// downloaded or written.
    pub fn resolve(options: Options) -> Result<Self, SyncError> {
        let version_pattern = VersionPattern::new(
            options
                .version_regexp
                .as_deref()
                .unwrap_or(DEFAULT_VERSION_REGEXP),
        )?;

        let filename = match options.filename {
            Some(filename) => filename,
            None => filename_from_url(&options.url)?,
        };

        let package_dir = options.package_dir.unwrap_or_else(|| PathBuf::from("."));
        let package = match options.package {
            Some(package) => package,
            None => package_from_dir(&package_dir)?,
        };

        Ok(Self {
            url: options.url,
            filename,
            package,
            email: options.email,
            version_pattern,
            history_file: options
                .history_file
                .unwrap_or_else(|| DEFAULT_HISTORY_FILE.to_string()),
            package_dir,
            outdir: options.outdir,
        })
    }

    /// `<package_dir>/<package>.spec`
    pub fn manifest_path(&self) -> PathBuf {
        self.package_file(MANIFEST_EXTENSION)
    }

    /// `<package_dir>/<package>.changes`
    pub fn changes_path(&self) -> PathBuf {
        self.package_file(CHANGES_EXTENSION)
    }

    /// Where the downloaded archive is stored
    pub fn archive_path(&self) -> PathBuf {
        self.package_dir.join(&self.filename)
    }

    fn package_file(&self, extension: &str) -> PathBuf {
        self.package_dir
            .join(format!("{}.{}", self.package, extension))
    }
}

/// Pattern with exactly one capture group, applied to the archive directory name
#[derive(Debug, Clone)]
pub struct VersionPattern {
    regex: Regex,
}

impl VersionPattern {
    pub fn new(pattern: &str) -> Result<Self, SyncError> {
        let regex = Regex::new(pattern).map_err(|e| {
            SyncError::pattern(pattern, format!("is not a valid regular expression: {}", e))
        })?;

        // captures_len counts the implicit whole-match group
        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(SyncError::pattern(
                pattern,
                format!("must have exactly one capture group, found {}", groups),
            ));
        }

        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Upstream version captured from `directory`
    pub fn extract(&self, directory: &str) -> Result<String, SyncError> {
        self.regex
            .captures(directory)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                SyncError::pattern(
                    self.as_str(),
                    format!("does not match archive directory '{}'", directory),
                )
            })
    }
}

/// Last path segment of the archive URL (or local path)
fn filename_from_url(location: &str) -> Result<String, SyncError> {
    let invalid = |reason: &str| SyncError::InvalidUrl {
        url: location.to_string(),
        reason: reason.to_string(),
    };

    match Url::parse(location) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .map(str::to_string)
            .ok_or_else(|| invalid("no file name in URL path; pass --filename")),
        Err(url::ParseError::RelativeUrlWithoutBase) => Path::new(location)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| invalid("no file name in path; pass --filename")),
        Err(e) => Err(invalid(&e.to_string())),
    }
}

/// Base name of the package directory
fn package_from_dir(dir: &Path) -> Result<String, SyncError> {
    let dir = dir
        .canonicalize()
        .map_err(|e| SyncError::io(dir, e))?;

    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or(SyncError::UnknownPackage(dir))
}
