//! Predicate library - typed, immutable matchers over extracted metadata.
//!
//! Every predicate is a pure function of `(ExtractedMetadata, path)` with no
//! shared mutable state, so predicates can be evaluated concurrently and in
//! any order.

pub mod error;
pub mod types;

pub use error::PredicateError;
pub use types::{DATE_FORMAT, Predicate};

use std::fmt;

/// Maximum number of predicates allowed in a single query (subject to tuning)
pub const MAX_PATTERNS: usize = 1000;

/// Predicate kinds. Predicates of the same kind form one OR-group.
///
/// The declaration order is the evaluation order: `Name` comes first because
/// it is decided from the path alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PredicateKind {
    Name,
    Tag,
    Title,
    Author,
    Field,
    Date,
}

impl PredicateKind {
    /// Whether predicates of this kind need the file's metadata
    #[must_use]
    pub const fn needs_metadata(self) -> bool {
        !matches!(self, Self::Name)
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Tag => "tag",
            Self::Title => "title",
            Self::Author => "author",
            Self::Field => "field",
            Self::Date => "date",
        };
        f.write_str(name)
    }
}

/// Case sensitivity for filename matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    #[default]
    Sensitive,
    Insensitive,
}

impl CaseMode {
    #[must_use]
    pub const fn from_ignore_case(ignore_case: bool) -> Self {
        if ignore_case { Self::Insensitive } else { Self::Sensitive }
    }
}
