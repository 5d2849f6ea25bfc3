use std::path::{Path, PathBuf};
use std::sync::Arc;

use globset::{GlobBuilder, GlobMatcher};
use ignore::{DirEntry, WalkBuilder};
use tracing::{debug, warn};

use super::error::DiscoveryError;
use super::FileDiscovery;

/// Directories skipped during enumeration unless configured otherwise.
/// Build artifacts, dependencies, caches and tool-specific directories.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "target",
    "build",
    "dist",
    "out",
    "bin",
    "obj",
    "node_modules",
    "vendor",
    "bower_components",
    "__pycache__",
    ".cache",
    ".parcel-cache",
    ".gradle",
    ".m2",
    ".next",
    ".nuxt",
    ".vitepress",
    ".docusaurus",
    ".output",
    ".serverless",
    ".idea",
    ".vscode",
    ".vs",
    ".obsidian",
    "tmp",
    "temp",
    "coverage",
    ".nyc_output",
    ".pytest_cache",
    ".tox",
];

/// Default glob for candidate files
pub const DEFAULT_GLOB: &str = "**/*.md";

/// File-system walker honouring ignore files, hidden entries and depth limits
#[derive(Debug, Clone)]
pub struct Walker {
    glob: GlobMatcher,
    max_depth: Option<usize>,
    include_hidden: bool,
    respect_ignore_files: bool,
    exclude_dirs: Arc<Vec<String>>,
}

impl Walker {
    /// Create a walker keeping files whose full path matches `glob`.
    ///
    /// # Errors
    /// Returns `DiscoveryError::InvalidGlob` if the glob cannot be parsed.
    pub fn new(glob: &str) -> Result<Self, DiscoveryError> {
        let glob = GlobBuilder::new(glob)
            .build()
            .map_err(|e| DiscoveryError::InvalidGlob {
                pattern: glob.to_string(),
                reason: e.to_string(),
            })?
            .compile_matcher();

        Ok(Self {
            glob,
            max_depth: None,
            include_hidden: false,
            respect_ignore_files: true,
            exclude_dirs: Arc::new(DEFAULT_EXCLUDED_DIRS.iter().map(|d| (*d).to_string()).collect()),
        })
    }

    /// Limit descent; 1 means the root directory's own entries only.
    #[must_use]
    pub const fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub const fn include_hidden(mut self, v: bool) -> Self {
        self.include_hidden = v;
        self
    }

    /// Honour `.gitignore`, `.ignore` and global git excludes.
    #[must_use]
    pub const fn respect_ignore_files(mut self, v: bool) -> Self {
        self.respect_ignore_files = v;
        self
    }

    /// Replace the list of directory names that are never entered.
    #[must_use]
    pub fn exclude_dirs(mut self, dirs: Vec<String>) -> Self {
        self.exclude_dirs = Arc::new(dirs);
        self
    }

    fn builder(&self, root: &Path) -> WalkBuilder {
        let mut walker = WalkBuilder::new(root);
        walker
            .git_ignore(self.respect_ignore_files)
            .git_global(self.respect_ignore_files)
            .git_exclude(self.respect_ignore_files)
            .ignore(self.respect_ignore_files)
            .parents(self.respect_ignore_files)
            .hidden(!self.include_hidden)
            .follow_links(false)
            .max_depth(self.max_depth)
            .sort_by_file_name(|a, b| a.cmp(b));

        let excluded = Arc::clone(&self.exclude_dirs);
        walker.filter_entry(move |entry| !is_excluded_dir(entry, &excluded));
        walker
    }
}

fn is_excluded_dir(entry: &DirEntry, excluded: &[String]) -> bool {
    entry.depth() > 0
        && entry.file_type().is_some_and(|t| t.is_dir())
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excluded.iter().any(|d| d == name))
}

impl FileDiscovery for Walker {
    fn discover(&self, roots: &[PathBuf]) -> Result<Vec<PathBuf>, DiscoveryError> {
        if let Some(missing) = roots.iter().find(|r| !r.exists()) {
            return Err(DiscoveryError::MissingRoot(missing.clone()));
        }

        let mut files = Vec::new();
        for root in roots {
            for entry in self.builder(root).build() {
                match entry {
                    Ok(entry) => {
                        let is_file = entry.file_type().is_some_and(|t| t.is_file());
                        if is_file && self.glob.is_match(entry.path()) {
                            files.push(entry.into_path());
                        }
                    }
                    Err(e) => warn!("Walk error: {e}"),
                }
            }
        }

        debug!(candidates = files.len(), roots = roots.len(), "enumeration finished");
        Ok(files)
    }
}
