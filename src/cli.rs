//! Command-line interface definitions and parsing
//!
//! Every filter flag may be repeated. Repetitions of one flag are
//! alternatives (OR); different flags must all hold (AND).
//!
//! # Examples
//!
//! ```no_run
//! use fmd::cli::Cli;
//!
//! let cli = Cli::parse_args();
//! let specs = cli.filter_specs();
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use clap_complete::Shell;

use crate::config::{FmdConfig, PathFormat};
use crate::predicates::CaseMode;
use crate::query::FilterSpec;
use crate::runner::OutputOrder;

/// Output order as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderArg {
    /// Sorted by path
    Sorted,
    /// Enumeration order
    Walk,
    /// As soon as each file is evaluated
    Unordered,
}

impl From<OrderArg> for OutputOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Sorted => Self::Sorted,
            OrderArg::Walk => Self::Walk,
            OrderArg::Unordered => Self::Unordered,
        }
    }
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "fmd")]
#[command(about = "Find markdown files by their frontmatter metadata", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directories to search
    #[arg(value_name = "DIR", default_value = ".")]
    pub dirs: Vec<PathBuf>,

    /// Match files carrying TAG (a leading '#' is optional)
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Match titles against a regex (case-insensitive)
    #[arg(short = 'T', long = "title", value_name = "REGEX")]
    pub titles: Vec<String>,

    /// Match the author field by substring (case-insensitive)
    #[arg(short = 'a', long = "author", value_name = "TEXT")]
    pub authors: Vec<String>,

    /// Match file names against a regex
    #[arg(short = 'n', long = "name", value_name = "REGEX")]
    pub names: Vec<String>,

    /// Make --name case-insensitive
    #[arg(short = 'i', long = "ignore-case")]
    pub ignore_case: bool,

    /// Match any value of a frontmatter field by substring
    #[arg(short = 'f', long = "field", value_name = "KEY:PATTERN")]
    pub fields: Vec<String>,

    /// Keep files dated on or after DATE (YYYY-MM-DD)
    #[arg(long = "date-after", value_name = "DATE")]
    pub date_after: Vec<String>,

    /// Keep files dated on or before DATE (YYYY-MM-DD)
    #[arg(long = "date-before", value_name = "DATE")]
    pub date_before: Vec<String>,

    /// Glob the full path of each file must match [default: **/*.md]
    #[arg(long = "glob", value_name = "GLOB")]
    pub glob: Option<String>,

    /// Maximum directory depth (1 = DIR itself)
    #[arg(short = 'd', long = "depth", value_name = "N")]
    pub depth: Option<usize>,

    /// Lines scanned when a file has no frontmatter [default: 10]
    #[arg(long = "head", value_name = "N")]
    pub head: Option<usize>,

    /// Scan whole files for hashtags and headings
    #[arg(long = "full-text")]
    pub full_text: bool,

    /// Include hidden files and directories
    #[arg(long = "hidden")]
    pub hidden: bool,

    /// Ignore .gitignore and .ignore files
    #[arg(long = "no-ignore")]
    pub no_ignore: bool,

    /// Separate output paths with NUL instead of newline
    #[arg(short = '0', long = "nul")]
    pub nul: bool,

    /// Order of the printed paths [default: sorted]
    #[arg(long = "order", value_enum)]
    pub order: Option<OrderArg>,

    /// Display absolute paths (overrides config)
    #[arg(long = "absolute", conflicts_with = "relative")]
    pub absolute: bool,

    /// Display relative paths (overrides config)
    #[arg(long = "relative", conflicts_with = "absolute")]
    pub relative: bool,

    /// Number of worker threads [default: one per CPU]
    #[arg(short = 'j', long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// Report skipped files (-v), progress (-vv) or everything (-vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Read settings from FILE in addition to the user config
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long = "print-config")]
    pub print_config: bool,

    /// Print a completion script for SHELL and exit
    #[arg(long = "completions", value_name = "SHELL", value_enum)]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Filters in kind order, each kind in the order given
    #[must_use]
    pub fn filter_specs(&self) -> Vec<FilterSpec> {
        let case = CaseMode::from_ignore_case(self.ignore_case);

        let names = self.names.iter().map(|p| FilterSpec::Name { pattern: p.clone(), case });
        let tags = self.tags.iter().cloned().map(FilterSpec::Tag);
        let titles = self.titles.iter().cloned().map(FilterSpec::Title);
        let authors = self.authors.iter().cloned().map(FilterSpec::Author);
        let fields = self.fields.iter().cloned().map(FilterSpec::Field);
        let after = self.date_after.iter().cloned().map(FilterSpec::DateAfter);
        let before = self.date_before.iter().cloned().map(FilterSpec::DateBefore);

        names
            .chain(tags)
            .chain(titles)
            .chain(authors)
            .chain(fields)
            .chain(after)
            .chain(before)
            .collect()
    }

    /// Helper method to get the path format override from the flags
    #[must_use]
    pub const fn get_path_format(&self) -> Option<PathFormat> {
        if self.absolute {
            Some(PathFormat::Absolute)
        } else if self.relative {
            Some(PathFormat::Relative)
        } else {
            None
        }
    }

    /// Overlay the flags that were given on top of `config`
    pub fn apply_to(&self, config: &mut FmdConfig) {
        if let Some(glob) = &self.glob {
            config.glob.clone_from(glob);
        }
        if self.depth.is_some() {
            config.max_depth = self.depth;
        }
        if let Some(head) = self.head {
            config.head_lines = head;
        }
        if let Some(order) = self.order {
            config.order = order.into();
        }
        if let Some(format) = self.get_path_format() {
            config.path_format = format;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        config.full_text |= self.full_text;
        config.hidden |= self.hidden;
        config.nul |= self.nul;
        if self.no_ignore {
            config.respect_ignore_files = false;
        }
    }
}
