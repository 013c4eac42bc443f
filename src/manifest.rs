//! RPM spec file field patcher
//!
//! Rewrites the `Version:`, `Source:`/`Source0:` and `%setup -n <dir>` fields.
//! Each field is changed at its first occurrence only; every other byte of the
//! file is kept as-is. A missing field is not an error, it is just left alone.

use crate::model::PackageVersion;
use crate::model::version::SNAPSHOT_INFIX;

/// Tag names recognized at the start of a line
pub mod tags {
    pub const VERSION: &[&str] = &["Version:"];
    pub const SOURCE: &[&str] = &["Source:", "Source0:"];
    pub const SETUP: &[&str] = &["%setup", "%autosetup"];
    /// Flag of the setup macro that names the extraction directory
    pub const SETUP_DIR_FLAG: &str = "-n";
}

/// New values for the recognized fields
#[derive(Debug, Clone, Copy)]
pub struct ManifestUpdate<'a> {
    pub version: &'a PackageVersion,
    /// Archive file name written to the source tag
    pub source: &'a str,
    /// Top-level directory of the archive
    pub setup_dir: &'a str,
}

/// Result of [`patch_manifest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPatch {
    pub text: String,
    pub version_patched: bool,
    pub source_patched: bool,
    pub setup_patched: bool,
}

/// Patch the recognized fields of `manifest`
pub fn patch_manifest(manifest: &str, update: &ManifestUpdate<'_>) -> ManifestPatch {
    let mut patch = ManifestPatch {
        text: String::with_capacity(manifest.len() + 64),
        version_patched: false,
        source_patched: false,
        setup_patched: false,
    };

    for line in manifest.split_inclusive('\n') {
        let (body, eol) = split_line_ending(line);

        if !patch.version_patched
            && let Some(start) = tag_value_start(body, tags::VERSION)
        {
            patch.text.push_str(&body[..start]);
            patch.text.push_str(update.version.as_str());
            patch.text.push_str(eol);
            patch.version_patched = true;
        } else if !patch.source_patched
            && let Some(start) = tag_value_start(body, tags::SOURCE)
        {
            patch.text.push_str(&body[..start]);
            patch.text.push_str(update.source);
            patch.text.push_str(eol);
            patch.source_patched = true;
        } else if !patch.setup_patched
            && let Some((start, end)) = setup_dir_span(body)
        {
            patch.text.push_str(&body[..start]);
            patch.text.push_str(update.setup_dir);
            patch.text.push_str(&body[end..]);
            patch.text.push_str(eol);
            patch.setup_patched = true;
        } else {
            patch.text.push_str(line);
        }
    }

    patch
}

/// Revision recorded in the first `Version:` field by a previous run
///
/// Input: "Version:        1.4.2+git.1728371564.9d1e4c7"
/// Output: Some("9d1e4c7")
///
/// Returns `None` when the version carries no snapshot suffix (first run).
pub fn recorded_revision(manifest: &str) -> Option<String> {
    let value = manifest.lines().find_map(|line| {
        let (body, _) = split_line_ending(line);
        tag_value_start(body, tags::VERSION).map(|start| body[start..].trim_end())
    })?;

    let (_, suffix) = value.rsplit_once(SNAPSHOT_INFIX)?;
    let (timestamp, revision) = suffix.split_once('.')?;

    let valid = !timestamp.is_empty()
        && timestamp.bytes().all(|b| b.is_ascii_digit())
        && !revision.is_empty()
        && revision.bytes().all(|b| b.is_ascii_hexdigit());

    valid.then(|| revision.to_string())
}

fn split_line_ending(line: &str) -> (&str, &str) {
    let body = line.trim_end_matches(['\n', '\r']);
    (body, &line[body.len()..])
}

/// Byte offset of the value of a `Tag: value` line, after the separating blanks
fn tag_value_start(body: &str, names: &[&str]) -> Option<usize> {
    let name = names.iter().find(|name| body.starts_with(**name))?;
    let rest = &body[name.len()..];
    let blanks = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    Some(name.len() + blanks)
}

/// Byte range of the directory token following `-n` on a setup macro line
fn setup_dir_span(body: &str) -> Option<(usize, usize)> {
    let is_setup = tags::SETUP.iter().any(|d| {
        body.strip_prefix(*d)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    });
    if !is_setup {
        return None;
    }

    let mut tokens = token_spans(body).into_iter().skip(1);
    while let Some((_, token)) = tokens.next() {
        if token == tags::SETUP_DIR_FLAG {
            let (start, dir) = tokens.next()?;
            return Some((start, start + dir.len()));
        }
    }

    None
}

/// Whitespace-separated tokens with their byte offsets
fn token_spans(s: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut start = None;

    for (i, c) in s.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(st)) => {
                spans.push((st, &s[st..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(st) = start {
        spans.push((st, &s[st..]));
    }

    spans
}
