use std::path::Path;

use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};

use super::error::PredicateError;
use super::{CaseMode, PredicateKind};
use crate::metadata::ExtractedMetadata;

/// Format accepted for date boundaries
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single typed matcher against one file's metadata and path
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Tag membership; `bare` is case-folded without a leading `#`
    Tag { original: String, bare: String },
    /// Case-insensitive regex search against the resolved title
    Title { original: String, compiled: Regex },
    /// Case-insensitive substring of any `author` value
    Author { original: String, needle: String },
    /// Regex search against the file's base name
    Name { original: String, compiled: Regex, case: CaseMode },
    /// Case-insensitive substring of any value under `key`
    Field { key: String, original: String, needle: String },
    /// Some date field falls on or after the boundary
    DateAfter(NaiveDate),
    /// Some date field falls on or before the boundary
    DateBefore(NaiveDate),
}

impl Predicate {
    /// Construct a tag predicate. A leading `#` is optional.
    ///
    /// # Errors
    /// Returns `PredicateError::InvalidEmpty` if nothing remains after the `#`.
    pub fn tag(s: &str) -> Result<Self, PredicateError> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix('#').unwrap_or(trimmed).to_lowercase();
        if bare.is_empty() {
            return Err(PredicateError::InvalidEmpty { kind: PredicateKind::Tag });
        }
        Ok(Self::Tag {
            original: s.to_string(),
            bare,
        })
    }

    /// Construct a title predicate from a regular expression.
    ///
    /// # Errors
    /// * Returns `PredicateError::InvalidEmpty` if `p` is empty.
    /// * Returns `PredicateError::InvalidRegex` if the pattern fails to compile.
    pub fn title(p: &str) -> Result<Self, PredicateError> {
        let compiled = compile(p, PredicateKind::Title, CaseMode::Insensitive)?;
        Ok(Self::Title {
            original: p.to_string(),
            compiled,
        })
    }

    /// Construct an author predicate (substring, case-insensitive).
    ///
    /// # Errors
    /// Returns `PredicateError::InvalidEmpty` if `p` is blank.
    pub fn author(p: &str) -> Result<Self, PredicateError> {
        let needle = p.trim().to_lowercase();
        if needle.is_empty() {
            return Err(PredicateError::InvalidEmpty { kind: PredicateKind::Author });
        }
        Ok(Self::Author {
            original: p.to_string(),
            needle,
        })
    }

    /// Construct a filename predicate from a regular expression.
    ///
    /// # Errors
    /// * Returns `PredicateError::InvalidEmpty` if `p` is empty.
    /// * Returns `PredicateError::InvalidRegex` if the pattern fails to compile.
    pub fn name(p: &str, case: CaseMode) -> Result<Self, PredicateError> {
        let compiled = compile(p, PredicateKind::Name, case)?;
        Ok(Self::Name {
            original: p.to_string(),
            compiled,
            case,
        })
    }

    /// Construct a field predicate from a key and a substring pattern.
    ///
    /// # Errors
    /// Returns `PredicateError::InvalidFieldSpec` if either side is blank.
    pub fn field(key: &str, pattern: &str) -> Result<Self, PredicateError> {
        let spec = format!("{key}:{pattern}");
        let key = key.trim();
        let pattern = pattern.trim();
        match (key.is_empty(), pattern.is_empty()) {
            (true, true) => Err(PredicateError::field_spec(&spec, "both field and pattern are empty")),
            (true, false) => Err(PredicateError::field_spec(&spec, "field name is empty")),
            (false, true) => Err(PredicateError::field_spec(&spec, "pattern is empty")),
            (false, false) => Ok(Self::Field {
                key: key.to_lowercase(),
                original: pattern.to_string(),
                needle: pattern.to_lowercase(),
            }),
        }
    }

    /// Parse a `key:pattern` field specification, splitting on the first colon.
    ///
    /// # Errors
    /// Returns `PredicateError::InvalidFieldSpec` if there is no colon or either side is blank.
    pub fn field_spec(spec: &str) -> Result<Self, PredicateError> {
        let (key, pattern) = spec
            .split_once(':')
            .ok_or_else(|| PredicateError::field_spec(spec, "expected 'field:pattern'"))?;
        Self::field(key, pattern)
    }

    /// Construct a lower date bound from `YYYY-MM-DD`.
    ///
    /// # Errors
    /// Returns `PredicateError::InvalidDate` if `s` is not a valid calendar date.
    pub fn date_after(s: &str) -> Result<Self, PredicateError> {
        parse_boundary(s, "--date-after").map(Self::DateAfter)
    }

    /// Construct an upper date bound from `YYYY-MM-DD`.
    ///
    /// # Errors
    /// Returns `PredicateError::InvalidDate` if `s` is not a valid calendar date.
    pub fn date_before(s: &str) -> Result<Self, PredicateError> {
        parse_boundary(s, "--date-before").map(Self::DateBefore)
    }

    #[must_use]
    pub const fn kind(&self) -> PredicateKind {
        match self {
            Self::Tag { .. } => PredicateKind::Tag,
            Self::Title { .. } => PredicateKind::Title,
            Self::Author { .. } => PredicateKind::Author,
            Self::Name { .. } => PredicateKind::Name,
            Self::Field { .. } => PredicateKind::Field,
            Self::DateAfter(_) | Self::DateBefore(_) => PredicateKind::Date,
        }
    }

    /// The user-facing text this predicate was built from
    #[must_use]
    pub fn original(&self) -> String {
        match self {
            Self::Tag { original, .. }
            | Self::Title { original, .. }
            | Self::Author { original, .. }
            | Self::Name { original, .. } => original.clone(),
            Self::Field { key, original, .. } => format!("{key}:{original}"),
            Self::DateAfter(d) | Self::DateBefore(d) => d.format(DATE_FORMAT).to_string(),
        }
    }

    /// Evaluate a predicate that needs no file content.
    ///
    /// Returns `None` for predicates that depend on extracted metadata.
    #[must_use]
    pub fn matches_path(&self, path: &Path) -> Option<bool> {
        match self {
            Self::Name { compiled, .. } => Some(
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|name| compiled.is_match(name)),
            ),
            _ => None,
        }
    }

    /// Check one date against a date bound.
    ///
    /// Returns `None` for predicates that are not date bounds.
    #[must_use]
    pub fn admits_date(&self, date: NaiveDate) -> Option<bool> {
        match self {
            Self::DateAfter(bound) => Some(date >= *bound),
            Self::DateBefore(bound) => Some(date <= *bound),
            _ => None,
        }
    }

    /// Evaluate against one file's metadata and path.
    ///
    /// A date bound on its own holds when any resolved date satisfies it;
    /// combining several bounds into one window is up to the caller.
    #[must_use]
    pub fn matches(&self, meta: &ExtractedMetadata, path: &Path) -> bool {
        match self {
            Self::Tag { bare, .. } => meta.has_tag(bare) || meta.has_tag(&format!("#{bare}")),
            Self::Title { compiled, .. } => meta.title().is_some_and(|t| compiled.is_match(t)),
            Self::Author { needle, .. } => any_value_contains(meta, "author", needle),
            Self::Name { .. } => self.matches_path(path).unwrap_or(false),
            Self::Field { key, needle, .. } => any_value_contains(meta, key, needle),
            Self::DateAfter(_) | Self::DateBefore(_) => {
                meta.dates().iter().any(|&(_, date)| self.admits_date(date) == Some(true))
            }
        }
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Name { original: a, case: ca, .. }, Self::Name { original: b, case: cb, .. }) => {
                a == b && ca == cb
            }
            (Self::DateAfter(a), Self::DateAfter(b)) | (Self::DateBefore(a), Self::DateBefore(b)) => a == b,
            (Self::DateAfter(_), Self::DateBefore(_)) | (Self::DateBefore(_), Self::DateAfter(_)) => false,
            _ => self.kind() == other.kind() && self.original() == other.original(),
        }
    }
}

impl Eq for Predicate {}

fn any_value_contains(meta: &ExtractedMetadata, key: &str, needle: &str) -> bool {
    meta.field(key)
        .is_some_and(|values| values.iter().any(|v| v.to_lowercase().contains(needle)))
}

fn compile(p: &str, kind: PredicateKind, case: CaseMode) -> Result<Regex, PredicateError> {
    if p.is_empty() {
        return Err(PredicateError::InvalidEmpty { kind });
    }
    RegexBuilder::new(p)
        .case_insensitive(case == CaseMode::Insensitive)
        .build()
        .map_err(|e| PredicateError::regex_compile(p, &e.to_string()))
}

fn parse_boundary(s: &str, flag: &'static str) -> Result<NaiveDate, PredicateError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| PredicateError::InvalidDate {
        flag,
        value: s.to_string(),
    })
}
