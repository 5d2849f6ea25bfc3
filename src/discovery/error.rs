use std::path::PathBuf;
use thiserror::Error;

/// Errors that prevent candidate enumeration from starting
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Glob failed to parse
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },

    /// A search root does not exist
    #[error("Search path does not exist: {}", .0.display())]
    MissingRoot(PathBuf),
}
