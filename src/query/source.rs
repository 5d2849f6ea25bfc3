use std::path::Path;

use crate::metadata::{self, DEFAULT_HEAD_LINES, ExtractError, ExtractedMetadata};

/// Trait for loading the metadata of one candidate file
///
/// The evaluator asks its source at most once per file, and only when a
/// metadata-dependent group is present and the path-only groups passed.
pub trait MetadataSource: Sync {
    /// Load metadata for `path`.
    ///
    /// # Errors
    /// Returns `ExtractError` if the file cannot be read.
    fn load(&self, path: &Path) -> Result<ExtractedMetadata, ExtractError>;
}

/// Extraction settings shared by every file in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Lines scanned when a file has no frontmatter
    pub head_limit: usize,
    /// Scan the whole file for tags and headings
    pub full_text: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            head_limit: DEFAULT_HEAD_LINES,
            full_text: false,
        }
    }
}

/// Reads metadata straight from the file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource {
    options: ExtractOptions,
}

impl FileSource {
    #[must_use]
    pub const fn new(options: ExtractOptions) -> Self {
        Self { options }
    }
}

impl MetadataSource for FileSource {
    fn load(&self, path: &Path) -> Result<ExtractedMetadata, ExtractError> {
        metadata::extract(path, self.options.head_limit, self.options.full_text)
    }
}

impl<S: MetadataSource + ?Sized> MetadataSource for &S {
    fn load(&self, path: &Path) -> Result<ExtractedMetadata, ExtractError> {
        (**self).load(path)
    }
}
