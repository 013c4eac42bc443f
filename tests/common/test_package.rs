//! TestPackage helper for integration tests.
//!
//! Provides a temporary package directory plus an "upstream" directory
//! holding generated snapshot tarballs.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

use specbump::Options;

/// Package name used by every fixture
pub const PACKAGE: &str = "frobnicate";

pub const EMAIL: &str = "packager@example.com";

/// Three-entry history, newest first; nothing in it is a merge
pub const HISTORY: &str = "\
commit 9d1e4c7b2a0f8e6d5c4b3a29180f7e6d5c4b3a21 (HEAD -> master, origin/master)
Author: Jane Doe <jane@example.com>
Date:   Tue Oct 8 09:12:44 2024 +0200

    Add --dry-run flag

commit 3f2a9c1d8e7b6a5f4e3d2c1b0a9f8e7d6c5b4a39
Author: John Roe <john@example.com>
Date:   Mon Oct 7 18:01:02 2024 +0200

    Cleanup build scripts

commit 1a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d
Author: John Roe <john@example.com>
Date:   Mon Oct 7 10:00:00 2024 +0200

    Drop python2 support
";

/// Spec template; `@VERSION@` is replaced by [`TestPackage::spec_with_version`]
pub const SPEC_TEMPLATE: &str = "\
Name:           frobnicate
Version:        @VERSION@
Release:        0
Summary:        Frobnicates things
License:        MIT
Source0:        frobnicate-1.4.1.tar.gz

%description
Frobnicates things.

%prep
%setup -q -n frobnicate-1.4.1

%build
make %{?_smp_mflags}
";

/// A temporary package checkout.
///
/// Everything is cleaned up when the TestPackage is dropped.
pub struct TestPackage {
    dir: TempDir,
}

impl TestPackage {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(dir.path().join("pkg")).expect("Failed to create package dir");
        fs::create_dir(dir.path().join("upstream")).expect("Failed to create upstream dir");
        Self { dir }
    }

    pub fn package_dir(&self) -> PathBuf {
        self.dir.path().join("pkg")
    }

    pub fn spec_path(&self) -> PathBuf {
        self.package_dir().join(format!("{}.spec", PACKAGE))
    }

    pub fn changes_path(&self) -> PathBuf {
        self.package_dir().join(format!("{}.changes", PACKAGE))
    }

    pub fn spec_with_version(version: &str) -> String {
        SPEC_TEMPLATE.replace("@VERSION@", version)
    }

    pub fn write_spec(&self, content: &str) {
        fs::write(self.spec_path(), content).expect("Failed to write spec");
    }

    pub fn write_changes(&self, content: &str) {
        fs::write(self.changes_path(), content).expect("Failed to write changes");
    }

    pub fn spec(&self) -> String {
        fs::read_to_string(self.spec_path()).expect("Failed to read spec")
    }

    /// Changes file content, `None` if it does not exist
    pub fn changes(&self) -> Option<String> {
        fs::read_to_string(self.changes_path()).ok()
    }

    /// Build `upstream/<top>.tar.gz` containing `<top>/<file>` for each file
    pub fn write_archive(&self, top: &str, files: &[(&str, &str)]) -> PathBuf {
        let path = self.dir.path().join("upstream").join(format!("{}.tar.gz", top));
        let encoder = GzEncoder::new(
            File::create(&path).expect("Failed to create archive"),
            Compression::default(),
        );
        let mut builder = tar::Builder::new(encoder);

        for (name, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, format!("{}/{}", top, name), content.as_bytes())
                .expect("Failed to append archive entry");
        }

        builder
            .into_inner()
            .and_then(|encoder| encoder.finish())
            .expect("Failed to finish archive");
        path
    }

    /// Snapshot archive `frobnicate-1.4.2.tar.gz` shipping [`HISTORY`] as `ChangeLog`
    pub fn write_snapshot(&self) -> PathBuf {
        self.write_archive(
            "frobnicate-1.4.2",
            &[("README", "Frobnicate\n"), ("ChangeLog", HISTORY)],
        )
    }

    /// Options pointing at `archive` as a local path
    pub fn options(&self, archive: &Path) -> Options {
        Options {
            url: archive.display().to_string(),
            package: Some(PACKAGE.to_string()),
            email: EMAIL.to_string(),
            package_dir: Some(self.package_dir()),
            ..Default::default()
        }
    }
}

impl Default for TestPackage {
    fn default() -> Self {
        Self::new()
    }
}
