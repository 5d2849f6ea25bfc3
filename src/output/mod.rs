//! Output formatting for matched paths
//!
//! Paths are written one per record, separated by a newline or, for
//! `xargs -0` style consumers, a NUL byte.

use crate::config::PathFormat;
use std::io::{self, Write};
use std::path::Path;

/// Record separator for emitted paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Newline,
    Nul,
}

impl Delimiter {
    #[must_use]
    pub const fn from_nul(nul: bool) -> Self {
        if nul { Self::Nul } else { Self::Newline }
    }

    const fn byte(self) -> u8 {
        match self {
            Self::Newline => b'\n',
            Self::Nul => b'\0',
        }
    }
}

/// Format a path according to the display mode
#[must_use]
pub fn format_path(path: &Path, format: PathFormat) -> String {
    match format {
        PathFormat::Absolute => std::path::absolute(path)
            .unwrap_or_else(|_| path.to_path_buf())
            .display()
            .to_string(),
        PathFormat::Relative => {
            if path.is_absolute()
                && let Ok(cwd) = std::env::current_dir()
                && let Ok(rel_path) = path.strip_prefix(&cwd)
            {
                return rel_path.display().to_string();
            }
            // Already relative, or outside the working directory
            path.display().to_string()
        }
    }
}

/// Write every path followed by `delimiter`.
///
/// # Errors
/// Returns the first I/O error from `writer` (a closed pipe included).
pub fn write_paths<W, P>(writer: &mut W, paths: &[P], format: PathFormat, delimiter: Delimiter) -> io::Result<()>
where
    W: Write,
    P: AsRef<Path>,
{
    for path in paths {
        writer.write_all(format_path(path.as_ref(), format).as_bytes())?;
        writer.write_all(&[delimiter.byte()])?;
    }
    writer.flush()
}
