//! Testing utilities for fmd
//!
//! Fixture helpers for writing Markdown files into temporary directories and
//! a [`CountingSource`] that records how often file metadata was requested.
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;

use crate::metadata::{ExtractError, ExtractedMetadata};
use crate::query::{FileSource, MetadataSource};

/// Write `content` to `name` inside `dir`, creating parent directories.
///
/// # Panics
/// Panics if the file cannot be written.
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Metadata source that counts loads.
///
/// Without an inner source it answers every request with empty metadata and
/// never touches the file system.
#[derive(Debug, Default)]
pub struct CountingSource {
    inner: Option<FileSource>,
    loads: AtomicUsize,
}

impl CountingSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count loads while delegating to `inner`
    #[must_use]
    pub fn wrapping(inner: FileSource) -> Self {
        Self {
            inner: Some(inner),
            loads: AtomicUsize::new(0),
        }
    }

    /// Number of times metadata was requested
    #[must_use]
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl MetadataSource for CountingSource {
    fn load(&self, path: &Path) -> Result<ExtractedMetadata, ExtractError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match &self.inner {
            Some(inner) => inner.load(path),
            None => Ok(ExtractedMetadata::default()),
        }
    }
}
