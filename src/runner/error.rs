use thiserror::Error;

/// Errors setting up a parallel run
#[derive(Debug, Error)]
pub enum RunError {
    /// The dedicated worker pool could not be created
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A worker count of zero was requested
    #[error("Worker count must be at least 1")]
    ZeroThreads,
}
