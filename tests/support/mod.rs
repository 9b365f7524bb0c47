//! Test support utilities for cloudship integration tests.
//!
//! Provides an isolated project directory and a fake `gcloud` that records
//! its arguments and keeps secret versions on disk.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own project dir and its own fake gcloud state dir.
/// No process-global state is mutated; child processes use `.current_dir()`
/// so tests can safely run in parallel.
pub struct Test {
    /// Project directory the command runs in
    pub dir: TempDir,
    /// Fake gcloud script, call log and secret versions
    pub gcloud: TempDir,
}

impl Test {
    /// Create a new empty test environment with a fake gcloud installed.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let gcloud = TempDir::new().expect("failed to create gcloud dir");

        fs::create_dir(gcloud.path().join("secrets")).expect("failed to create secrets dir");
        write_script(&gcloud.path().join("gcloud"), FAKE_GCLOUD);

        Self { dir, gcloud }
    }

    /// Create a test environment with a secrets file.
    pub fn with_secrets_file(contents: &str) -> Self {
        let t = Self::new();
        t.write("secrets.env", contents);
        t
    }

    /// Write a file into the project directory.
    pub fn write(&self, name: &str, contents: &str) {
        fs::write(self.dir.path().join(name), contents).expect("failed to write file");
    }

    /// Path of the fake gcloud binary.
    pub fn gcloud_bin(&self) -> PathBuf {
        self.gcloud.path().join("gcloud")
    }

    /// Pretend a secret already exists with the given versions.
    pub fn seed_secret(&self, identifier: &str, versions: &[&str]) {
        let mut contents = String::new();
        for v in versions {
            contents.push_str(v);
            contents.push('\n');
        }
        fs::write(self.gcloud.path().join("secrets").join(identifier), contents)
            .expect("failed to seed secret");
    }

    /// Version history recorded by the fake gcloud, oldest first.
    pub fn versions(&self, identifier: &str) -> Option<Vec<String>> {
        fs::read_to_string(self.gcloud.path().join("secrets").join(identifier))
            .ok()
            .map(|s| s.lines().map(String::from).collect())
    }

    /// Every gcloud invocation so far, one line of arguments each.
    pub fn gcloud_calls(&self) -> Vec<String> {
        fs::read_to_string(self.gcloud.path().join("calls.log"))
            .map(|s| s.lines().map(String::from).collect())
            .unwrap_or_default()
    }
}

#[cfg(unix)]
fn write_script(path: &std::path::Path, contents: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, contents).expect("failed to write fake gcloud");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("failed to make fake gcloud executable");
}

#[cfg(not(unix))]
fn write_script(path: &std::path::Path, contents: &str) {
    fs::write(path, contents).expect("failed to write fake gcloud");
}
