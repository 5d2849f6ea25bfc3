//! Candidate enumeration
//!
//! Produces the paths the filter engine examines. Traversal concerns (glob,
//! depth limit, ignore files, hidden entries, excluded directories) live
//! entirely here; the engine never walks the file system itself.

pub mod error;
pub mod walker;

pub use error::DiscoveryError;
pub use walker::{DEFAULT_EXCLUDED_DIRS, DEFAULT_GLOB, Walker};

use std::path::PathBuf;

/// Trait for enumerating candidate files below a set of roots
pub trait FileDiscovery {
    /// Discover candidate file paths below `roots`.
    ///
    /// # Errors
    /// Returns `DiscoveryError` if enumeration cannot start (missing root).
    /// Problems with individual entries are logged and skipped.
    fn discover(&self, roots: &[PathBuf]) -> Result<Vec<PathBuf>, DiscoveryError>;
}
