//! Scratch directories for host filesystem tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary directory, removed when dropped
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("textflow-test-")
            .tempdir()
            .unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write raw bytes to `name` and return its path
    pub fn seed(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.file(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}
