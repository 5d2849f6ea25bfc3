use std::path::Path;

use chrono::NaiveDate;
use tracing::{trace, warn};

use super::{MetadataSource, PredicateGroup, Query};
use crate::metadata::{ExtractError, ExtractedMetadata};
use crate::predicates::{Predicate, PredicateKind};

impl Query {
    /// Decide whether `path` matches, reading it with this query's own settings.
    ///
    /// Unreadable files do not match; the cause is logged at `warn` level.
    #[must_use]
    pub fn evaluate(&self, path: &Path) -> bool {
        match self.check_with(path, &self.file_source()) {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!("{e}");
                false
            }
        }
    }

    /// Decide whether `path` matches, loading metadata through `source`.
    ///
    /// Path-only groups are checked first; if one fails the source is never
    /// consulted. Otherwise metadata is loaded once and shared by every
    /// remaining group, stopping at the first group that fails.
    ///
    /// # Errors
    /// Returns the `ExtractError` from `source` if metadata was needed and could not be loaded.
    pub fn check_with<S>(&self, path: &Path, source: &S) -> Result<bool, ExtractError>
    where
        S: MetadataSource + ?Sized,
    {
        let (path_groups, meta_groups): (Vec<&PredicateGroup>, Vec<&PredicateGroup>) =
            self.groups.iter().partition(|g| !g.kind.needs_metadata());

        for group in path_groups {
            if !group.matches_path(path) {
                trace!(path = %path.display(), kind = %group.kind, "rejected before reading");
                return Ok(false);
            }
        }

        if meta_groups.is_empty() {
            return Ok(true);
        }

        let meta = source.load(path)?;
        Ok(meta_groups.iter().all(|group| group.matches(&meta, path)))
    }
}

impl PredicateGroup {
    fn matches_path(&self, path: &Path) -> bool {
        self.alternatives
            .iter()
            .any(|p| p.matches_path(path).unwrap_or(false))
    }

    /// OR over the alternatives, except for dates: a single resolved date has
    /// to fall inside the window formed by the lower and upper bounds.
    #[must_use]
    pub fn matches(&self, meta: &ExtractedMetadata, path: &Path) -> bool {
        match self.kind {
            PredicateKind::Date => date_window_matches(&self.alternatives, meta),
            _ => self.alternatives.iter().any(|p| p.matches(meta, path)),
        }
    }
}

fn date_window_matches(bounds: &[Predicate], meta: &ExtractedMetadata) -> bool {
    let (lower, upper): (Vec<&Predicate>, Vec<&Predicate>) =
        bounds.iter().partition(|p| matches!(p, Predicate::DateAfter(_)));

    // An empty side leaves the window open; several bounds on one side are alternatives.
    let side_admits = |side: &[&Predicate], date: NaiveDate| {
        side.is_empty() || side.iter().any(|p| p.admits_date(date) == Some(true))
    };

    meta.dates()
        .iter()
        .any(|&(_, date)| side_admits(lower.as_slice(), date) && side_admits(upper.as_slice(), date))
}
