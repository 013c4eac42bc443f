//! Spec and changes file storage
//!
//! Files are replaced atomically: new content goes to a temporary file in the
//! same directory which is then renamed over the target. If anything fails
//! before the rename, the original file is untouched.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::SyncError;

/// Read a whole text file
pub fn read_text(path: &Path) -> Result<String, SyncError> {
    fs::read_to_string(path).map_err(|e| SyncError::io(path, e))
}

/// Read a text file, treating a missing file as empty
pub fn read_text_or_empty(path: &Path) -> Result<String, SyncError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(SyncError::io(path, e)),
    }
}

/// Mode requested for new files, before the process umask is applied
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o666;

/// Replace `path` with `contents` in one rename
///
/// Keeps the permissions of an existing target. A new target gets the same
/// mode a plain `File::create` would give it under the current umask.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), SyncError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = temp_file_in(dir).map_err(|e| SyncError::io(dir, e))?;
    temp.write_all(contents)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| SyncError::io(temp.path(), e))?;

    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| SyncError::io(temp.path(), e))?;
    }

    temp.persist(path).map_err(|e| SyncError::io(path, e.error))?;
    debug!(path = %path.display(), bytes = contents.len(), "replaced file");
    Ok(())
}

fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(NEW_FILE_MODE));
    }
    builder.tempfile_in(dir)
}

/// Put `block` in front of the current content of `path`, creating it if needed
pub fn prepend(path: &Path, block: &str) -> Result<(), SyncError> {
    let existing = read_text_or_empty(path)?;

    let mut contents = String::with_capacity(block.len() + existing.len());
    contents.push_str(block);
    contents.push_str(&existing);

    write_atomic(path, contents.as_bytes())
}
