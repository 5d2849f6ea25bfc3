//! Metadata extraction
//!
//! Turns the top of a Markdown file into an [`ExtractedMetadata`] record:
//! a case-folded tag set, an optional title, case-folded multi-valued fields
//! and the dates found under the well-known date fields.
//!
//! Two metadata layouts are understood:
//!
//! - **Frontmatter**: a block opened by a `---` line on the very first line
//!   and closed by the next `---` line.
//! - **Head lines**: without frontmatter, the first `head_limit` lines of the
//!   file are treated as the metadata block.
//!
//! In full-text mode tag and heading scanning cover the whole file, while
//! field lookup keeps preferring the frontmatter block when there is one.
//!
//! # Examples
//!
//! ```no_run
//! use fmd::metadata::extract;
//! use std::path::Path;
//!
//! let meta = extract(Path::new("notes/todo.md"), 10, false).unwrap();
//! if meta.has_tag("work") {
//!     println!("{:?}", meta.title());
//! }
//! ```

pub mod error;
pub mod parse;
pub mod reader;

pub use error::ExtractError;
pub use reader::{MAX_FRONTMATTER_LINES, MetadataBlock};

use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDate;

use parse::FieldMap;

/// Default number of head lines scanned when a file has no frontmatter
pub const DEFAULT_HEAD_LINES: usize = 10;

/// Well-known date fields, in resolution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateField {
    Date,
    Created,
    Updated,
    Modified,
}

impl DateField {
    /// All date fields in the fixed order they are tried
    pub const ALL: [Self; 4] = [Self::Date, Self::Created, Self::Updated, Self::Modified];

    /// Field name as written in a metadata block
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Modified => "modified",
        }
    }
}

/// Read-only view over one file's metadata block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMetadata {
    tags: BTreeSet<String>,
    title: Option<String>,
    fields: FieldMap,
    dates: Vec<(DateField, NaiveDate)>,
    has_frontmatter: bool,
}

impl ExtractedMetadata {
    /// Build the metadata view for an already captured block
    #[must_use]
    pub fn from_block(block: &MetadataBlock) -> Self {
        let raw = parse::parse_fields(block.field_lines());

        let mut tags = BTreeSet::new();
        if let Some(values) = raw.get("tags") {
            parse::collect_field_tags(values, &mut tags);
        }
        let fields = parse::into_field_map(raw);
        if let Some(frontmatter) = &block.frontmatter {
            parse::scan_hashtags(frontmatter, &mut tags);
        }
        parse::scan_hashtags(&block.body, &mut tags);

        let title = fields
            .get("title")
            .and_then(|values| values.first())
            .filter(|title| !title.trim().is_empty())
            .cloned()
            .or_else(|| parse::first_heading(&block.body));

        let dates = DateField::ALL
            .iter()
            .filter_map(|&field| {
                fields
                    .get(field.key())?
                    .iter()
                    .find_map(|value| parse::parse_date(value))
                    .map(|date| (field, date))
            })
            .collect();

        Self {
            tags,
            title,
            fields,
            dates,
            has_frontmatter: block.frontmatter.is_some(),
        }
    }

    /// Case-folded tag set (without leading `#`)
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Check tag membership, case-insensitively
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag.to_lowercase())
    }

    /// Resolved title: the `title` field, else the first heading
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Values of a field, looked up case-insensitively
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&[String]> {
        self.fields.get(&key.to_lowercase()).map(Vec::as_slice)
    }

    /// Parsed dates in resolution order; unparsable fields are absent
    #[must_use]
    pub fn dates(&self) -> &[(DateField, NaiveDate)] {
        &self.dates
    }

    #[must_use]
    pub const fn has_frontmatter(&self) -> bool {
        self.has_frontmatter
    }
}

/// Extract metadata from the file at `path`.
///
/// Reads at most `head_limit` lines when the file has no frontmatter, stops at
/// the closing delimiter when it does, and reads the whole file in
/// `full_text` mode.
///
/// # Errors
/// Returns `ExtractError` if the file cannot be opened or read, or if its
/// frontmatter exceeds [`MAX_FRONTMATTER_LINES`].
pub fn extract(path: &Path, head_limit: usize, full_text: bool) -> Result<ExtractedMetadata, ExtractError> {
    let block = reader::read_block(path, head_limit, full_text)?;
    Ok(ExtractedMetadata::from_block(&block))
}
