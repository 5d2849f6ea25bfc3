//! fmd - find markdown files by their metadata
//!
//! Each candidate file contributes a small metadata record: tags, a title,
//! key/value fields and dates, read from a `---` frontmatter block or from
//! the first lines of the file. A [`query::Query`] made of typed predicates
//! is evaluated against every record in parallel, and the matching paths are
//! printed.
//!
//! ```no_run
//! use fmd::discovery::{FileDiscovery, Walker, DEFAULT_GLOB};
//! use fmd::query::{FilterSpec, Query};
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), fmd::FmdError> {
//! let query = Query::new(10, false, &[FilterSpec::Tag("work".into())])?;
//! let candidates = Walker::new(DEFAULT_GLOB)?.discover(&[PathBuf::from("notes")])?;
//! let report = fmd::runner::run(&query, candidates)?;
//! for path in report.matches {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod discovery;
pub mod logging;
pub mod metadata;
pub mod output;
pub mod predicates;
pub mod query;
pub mod runner;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum FmdError {
    /// Invalid filter given on the command line
    #[error("{0}")]
    Predicate(#[from] predicates::PredicateError),
    /// Candidate enumeration could not start
    #[error("{0}")]
    Discovery(#[from] discovery::DiscoveryError),
    /// Worker pool could not be created
    #[error("{0}")]
    Run(#[from] runner::RunError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
