//! Diagnostic logging on stderr
//!
//! Standard output carries only matched paths, so every diagnostic goes to
//! stderr. `RUST_LOG` takes precedence over the verbosity flag.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map a `-v` count to a maximum level
#[must_use]
pub const fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialize the global subscriber.
///
/// Calling it twice is harmless; the second subscriber is discarded.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity).as_str().to_lowercase()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
