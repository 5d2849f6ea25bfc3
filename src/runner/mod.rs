//! Parallel runner
//!
//! Applies a [`Query`] to every candidate path on a bounded rayon pool and
//! collects the matches. Each candidate is evaluated independently: the only
//! thing shared between workers is the immutable query, and a file that fails
//! to load only produces a [`FileWarning`] for itself.
//!
//! Parallel evaluation finishes candidates in no particular order. Callers
//! that need stable output pick an [`OutputOrder`] and the runner buffers and
//! reorders the matches after the pool has drained.

pub mod error;

pub use error::RunError;

use std::path::PathBuf;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::metadata::ExtractError;
use crate::query::{FileSource, MetadataSource, Query};

/// Order in which matches are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputOrder {
    /// Sorted by path, like `ls`
    #[default]
    Sorted,
    /// The order in which the candidates were enumerated
    Walk,
    /// Completion order; cheapest, not reproducible
    Unordered,
}

/// A candidate that could not be evaluated
#[derive(Debug)]
pub struct FileWarning {
    pub path: PathBuf,
    pub error: ExtractError,
}

/// Outcome of one run
#[derive(Debug, Default)]
pub struct RunReport {
    /// Matching paths, in the requested order
    pub matches: Vec<PathBuf>,
    /// Candidates that were treated as non-matching because they failed to load
    pub warnings: Vec<FileWarning>,
    /// Number of candidates evaluated
    pub examined: usize,
}

/// Runs a query over a candidate stream
pub struct Runner<'q, S = FileSource> {
    query: &'q Query,
    source: S,
    order: OutputOrder,
    threads: Option<usize>,
}

impl<'q> Runner<'q, FileSource> {
    /// Runner reading files with the query's own extraction settings
    #[must_use]
    pub const fn new(query: &'q Query) -> Self {
        Self {
            query,
            source: query.file_source(),
            order: OutputOrder::Sorted,
            threads: None,
        }
    }
}

impl<'q, S: MetadataSource> Runner<'q, S> {
    /// Replace the metadata source
    #[must_use]
    pub fn with_source<T: MetadataSource>(self, source: T) -> Runner<'q, T> {
        Runner {
            query: self.query,
            source,
            order: self.order,
            threads: self.threads,
        }
    }

    #[must_use]
    pub const fn order(mut self, order: OutputOrder) -> Self {
        self.order = order;
        self
    }

    /// Use a dedicated pool of `n` workers instead of the global pool,
    /// which is sized to the available hardware parallelism.
    #[must_use]
    pub const fn threads(mut self, n: Option<usize>) -> Self {
        self.threads = n;
        self
    }

    /// Evaluate every candidate and collect the matches.
    ///
    /// # Errors
    /// Returns `RunError` only if a dedicated worker pool was requested and
    /// could not be built. Per-file failures end up in [`RunReport::warnings`].
    pub fn run<I>(&self, candidates: I) -> Result<RunReport, RunError>
    where
        I: IntoIterator<Item = PathBuf>,
        I::IntoIter: Send,
    {
        let candidates = candidates.into_iter();
        match self.threads {
            None => Ok(self.drain(candidates)),
            Some(0) => Err(RunError::ZeroThreads),
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
                Ok(pool.install(|| self.drain(candidates)))
            }
        }
    }

    fn drain<I>(&self, candidates: I) -> RunReport
    where
        I: Iterator<Item = PathBuf> + Send,
    {
        let query = self.query;
        let source = &self.source;

        let outcomes: Vec<(usize, PathBuf, Result<bool, ExtractError>)> = candidates
            .enumerate()
            .par_bridge()
            .map(|(index, path)| {
                let verdict = query.check_with(&path, source);
                (index, path, verdict)
            })
            .collect();

        let examined = outcomes.len();
        let mut matched = Vec::new();
        let mut warnings = Vec::new();
        for (index, path, verdict) in outcomes {
            match verdict {
                Ok(true) => matched.push((index, path)),
                Ok(false) => {}
                Err(error) => {
                    warn!("Skipping {}: {error}", path.display());
                    warnings.push(FileWarning { path, error });
                }
            }
        }

        match self.order {
            OutputOrder::Sorted => matched.sort_by(|a, b| a.1.cmp(&b.1)),
            OutputOrder::Walk => matched.sort_by_key(|(index, _)| *index),
            OutputOrder::Unordered => {}
        }
        warnings.sort_by(|a, b| a.path.cmp(&b.path));

        debug!(examined, matched = matched.len(), warnings = warnings.len(), "run finished");

        RunReport {
            matches: matched.into_iter().map(|(_, path)| path).collect(),
            warnings,
            examined,
        }
    }
}

/// Run `query` over `candidates` on the global pool, sorted output.
///
/// # Errors
/// Never fails on the global pool; the `Result` mirrors [`Runner::run`].
pub fn run<I>(query: &Query, candidates: I) -> Result<RunReport, RunError>
where
    I: IntoIterator<Item = PathBuf>,
    I::IntoIter: Send,
{
    Runner::new(query).run(candidates)
}
