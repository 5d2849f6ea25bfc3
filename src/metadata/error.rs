//! Per-file extraction errors
//!
//! Every variant here is scoped to a single candidate file. The runner turns
//! them into warnings and carries on with the next file; none of them is ever
//! fatal to a run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting metadata from one file
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file could not be opened (missing, permission denied, ...)
    #[error("Cannot open {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was opened but reading it failed part way (including invalid UTF-8)
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The frontmatter block never closed within the allowed number of lines
    #[error("Frontmatter exceeds maximum size ({max} lines) in {}", .path.display())]
    FrontmatterTooLarge { path: PathBuf, max: usize },
}

impl ExtractError {
    /// Path of the file the error belongs to
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Unreadable { path, .. }
            | Self::Io { path, .. }
            | Self::FrontmatterTooLarge { path, .. } => path,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
