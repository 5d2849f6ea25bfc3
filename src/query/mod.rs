//! Query construction and evaluation
//!
//! A [`Query`] is the full filtering request for one run: predicates grouped
//! by [`PredicateKind`], combined with OR inside a group and AND across
//! groups. It is built once from the parsed command line and then shared
//! read-only by every worker.
//!
//! ```text
//!   (name₁ ∨ name₂) ∧ (tag₁ ∨ tag₂) ∧ (field author:x ∨ field status:y) ∧ date-window
//! ```
//!
//! All `Field` predicates form a single group regardless of their keys, so
//! `author:John` and `status:published` are alternatives, not requirements.
//!
//! # Examples
//!
//! ```no_run
//! use fmd::query::{FilterSpec, Query};
//! use std::path::Path;
//!
//! let query = Query::new(10, false, &[
//!     FilterSpec::Tag("work".into()),
//!     FilterSpec::Title("meeting".into()),
//! ]).unwrap();
//!
//! if query.evaluate(Path::new("notes/standup.md")) {
//!     println!("match");
//! }
//! ```

mod evaluator;
pub mod source;

pub use source::{ExtractOptions, FileSource, MetadataSource};

use std::collections::BTreeMap;

use crate::predicates::{CaseMode, MAX_PATTERNS, Predicate, PredicateError, PredicateKind};

/// A typed, not yet validated filter as received from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    Tag(String),
    Title(String),
    Author(String),
    Name { pattern: String, case: CaseMode },
    /// `key:pattern`, split on the first colon
    Field(String),
    DateAfter(String),
    DateBefore(String),
}

impl FilterSpec {
    /// Validate and compile into a predicate.
    ///
    /// # Errors
    /// Returns `PredicateError` for empty patterns, invalid regexes, malformed
    /// field specifications or malformed dates.
    pub fn compile(&self) -> Result<Predicate, PredicateError> {
        match self {
            Self::Tag(t) => Predicate::tag(t),
            Self::Title(p) => Predicate::title(p),
            Self::Author(p) => Predicate::author(p),
            Self::Name { pattern, case } => Predicate::name(pattern, *case),
            Self::Field(spec) => Predicate::field_spec(spec),
            Self::DateAfter(d) => Predicate::date_after(d),
            Self::DateBefore(d) => Predicate::date_before(d),
        }
    }
}

/// Predicates of one kind, combined with OR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateGroup {
    pub kind: PredicateKind,
    pub alternatives: Vec<Predicate>,
}

/// Immutable filtering request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    groups: Vec<PredicateGroup>,
    options: ExtractOptions,
}

impl Query {
    /// Build a query from a head-line limit, the full-text flag and the parsed filters.
    ///
    /// # Errors
    /// Returns `PredicateError` if any filter is invalid or there are more than
    /// [`MAX_PATTERNS`] of them.
    pub fn new(head_limit: usize, full_text: bool, specs: &[FilterSpec]) -> Result<Self, PredicateError> {
        let mut builder = QueryBuilder::new().head_limit(head_limit).full_text(full_text);
        for spec in specs {
            builder.add_spec(spec.clone());
        }
        builder.build()
    }

    /// Groups in evaluation order
    #[must_use]
    pub fn groups(&self) -> &[PredicateGroup] {
        &self.groups
    }

    #[must_use]
    pub const fn options(&self) -> ExtractOptions {
        self.options
    }

    /// A query without predicates matches every candidate
    #[must_use]
    pub fn is_enumeration(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether evaluation may need to open files
    #[must_use]
    pub fn needs_metadata(&self) -> bool {
        self.groups.iter().any(|g| g.kind.needs_metadata())
    }

    /// Number of predicates across all groups
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.alternatives.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Metadata source reading files with this query's extraction settings
    #[must_use]
    pub const fn file_source(&self) -> FileSource {
        FileSource::new(self.options)
    }
}

/// Builder collecting filter specs and producing a [`Query`]
#[derive(Debug, Default)]
pub struct QueryBuilder {
    specs: Vec<FilterSpec>,
    options: ExtractOptions,
}

impl QueryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of head lines scanned when there is no frontmatter.
    #[must_use]
    pub const fn head_limit(mut self, v: usize) -> Self {
        self.options.head_limit = v;
        self
    }

    /// Set whether tag and heading scanning covers the whole file.
    #[must_use]
    pub const fn full_text(mut self, v: bool) -> Self {
        self.options.full_text = v;
        self
    }

    pub fn add_spec(&mut self, spec: FilterSpec) {
        self.specs.push(spec);
    }

    /// Compile every spec and group the predicates by kind.
    ///
    /// # Errors
    /// * Returns `PredicateError::TooManyPatterns` if more than [`MAX_PATTERNS`] specs were added.
    /// * Returns the first compilation error among the specs, in insertion order.
    pub fn build(self) -> Result<Query, PredicateError> {
        if self.specs.len() > MAX_PATTERNS {
            return Err(PredicateError::TooManyPatterns {
                provided: self.specs.len(),
                max: MAX_PATTERNS,
            });
        }

        let mut grouped: BTreeMap<PredicateKind, Vec<Predicate>> = BTreeMap::new();
        for spec in &self.specs {
            let predicate = spec.compile()?;
            grouped.entry(predicate.kind()).or_default().push(predicate);
        }

        let groups = grouped
            .into_iter()
            .map(|(kind, alternatives)| PredicateGroup { kind, alternatives })
            .collect();

        Ok(Query {
            groups,
            options: self.options,
        })
    }
}
