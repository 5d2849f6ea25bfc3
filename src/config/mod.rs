//! Configuration module for fmd
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. The user config file (`~/.config/fmd/config.toml` on Linux), if present
//! 3. A file passed with `--config`
//! 4. `FMD_*` environment variables (`FMD_HEAD_LINES=20`, `FMD_EXCLUDE_DIRS=a,b`)
//!
//! Command-line flags are applied on top by the binary. The tool never
//! creates or rewrites a configuration file.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::discovery::{DEFAULT_EXCLUDED_DIRS, DEFAULT_GLOB};
use crate::metadata::DEFAULT_HEAD_LINES;
use crate::runner::OutputOrder;

/// Prefix of environment variables read as configuration
pub const ENV_PREFIX: &str = "FMD";

/// Path display format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PathFormat {
    /// Display absolute paths
    Absolute,
    /// Display paths relative to the current directory where possible
    #[default]
    Relative,
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FmdConfig {
    /// Lines scanned for metadata when a file has no frontmatter
    pub head_lines: usize,

    /// Scan whole files for tags and headings
    pub full_text: bool,

    /// Glob matched against each candidate's full path
    pub glob: String,

    /// Maximum directory depth (1 = the search root only)
    pub max_depth: Option<usize>,

    /// Directory names that are never entered
    pub exclude_dirs: Vec<String>,

    /// Include hidden files and directories
    pub hidden: bool,

    /// Honour `.gitignore` and `.ignore` files
    pub respect_ignore_files: bool,

    /// How matching paths are displayed
    pub path_format: PathFormat,

    /// Order of reported matches
    pub order: OutputOrder,

    /// Worker count; unset means one per available CPU
    pub threads: Option<usize>,

    /// Separate output paths with NUL instead of newline
    pub nul: bool,
}

impl Default for FmdConfig {
    fn default() -> Self {
        Self {
            head_lines: DEFAULT_HEAD_LINES,
            full_text: false,
            glob: DEFAULT_GLOB.to_string(),
            max_depth: None,
            exclude_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| (*d).to_string()).collect(),
            hidden: false,
            respect_ignore_files: true,
            path_format: PathFormat::default(),
            order: OutputOrder::default(),
            threads: None,
            nul: false,
        }
    }
}

impl FmdConfig {
    /// Get the path to the user config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("fmd").join("config.toml"))
    }

    /// Load the layered configuration
    ///
    /// A missing user config file is fine; a missing `explicit` file is not.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a file cannot be read or parsed, or a value has the wrong type.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let user = Self::config_path().ok();
        Self::load_from(user.as_deref(), explicit, Some(ENV_PREFIX))
    }

    /// Load from the given sources only
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a file cannot be read or parsed, or a value has the wrong type.
    pub fn load_from(
        user: Option<&Path>,
        explicit: Option<&Path>,
        env_prefix: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        if let Some(prefix) = env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("exclude_dirs"),
            );
        }

        builder.build()?.try_deserialize()
    }

    /// Render as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot be serialized.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::write_file;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = FmdConfig::default();
        assert_eq!(config.head_lines, 10);
        assert_eq!(config.glob, "**/*.md");
        assert!(config.exclude_dirs.contains(&"node_modules".to_string()));
        assert!(config.respect_ignore_files);
        assert_eq!(config.order, OutputOrder::Sorted);
    }

    #[test]
    fn test_no_sources_gives_defaults() {
        let config = FmdConfig::load_from(None, None, None).unwrap();
        assert_eq!(config, FmdConfig::default());
    }

    #[test]
    fn test_missing_user_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let config = FmdConfig::load_from(Some(&dir.path().join("absent.toml")), None, None).unwrap();
        assert_eq!(config, FmdConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(FmdConfig::load_from(None, Some(&dir.path().join("absent.toml")), None).is_err());
    }

    #[test]
    fn test_explicit_file_overrides_user_file() {
        let dir = TempDir::new().unwrap();
        let user = write_file(&dir, "user.toml", "head_lines = 20\nglob = \"**/*.txt\"\n");
        let explicit = write_file(&dir, "explicit.toml", "head_lines = 5\norder = \"walk\"\npath_format = \"absolute\"\n");

        let config = FmdConfig::load_from(Some(&user), Some(&explicit), None).unwrap();
        assert_eq!(config.head_lines, 5);
        assert_eq!(config.glob, "**/*.txt");
        assert_eq!(config.order, OutputOrder::Walk);
        assert_eq!(config.path_format, PathFormat::Absolute);
        assert!(!config.full_text);
    }

    #[test]
    fn test_wrong_type_is_error() {
        let dir = TempDir::new().unwrap();
        let bad = write_file(&dir, "bad.toml", "head_lines = \"many\"\n");
        assert!(FmdConfig::load_from(None, Some(&bad), None).is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_settings() {
        let config = FmdConfig {
            head_lines: 3,
            max_depth: Some(2),
            exclude_dirs: vec!["drafts".to_string()],
            ..FmdConfig::default()
        };
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "dump.toml", &config.to_toml().unwrap());

        let loaded = FmdConfig::load_from(None, Some(&path), None).unwrap();
        assert_eq!(loaded, config);
    }
}
