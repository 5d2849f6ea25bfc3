//! Bounded line reader
//!
//! Reads only as much of a file as the extraction mode needs. The file handle
//! lives inside [`read_block`] and is closed as soon as the block boundary (or
//! the head limit) is reached, so large files are never read past their
//! metadata in head-limited mode.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use super::error::ExtractError;

/// Maximum number of lines accepted inside a frontmatter block
pub const MAX_FRONTMATTER_LINES: usize = 1000;

/// Raw text captured from the top of a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataBlock {
    /// Lines between the opening and closing `---`, if the file starts with one
    pub frontmatter: Option<Vec<String>>,
    /// Lines outside the frontmatter that were read.
    ///
    /// Without frontmatter these are the head-limited lines (or every line in
    /// full-text mode). With frontmatter, the remainder of the file in
    /// full-text mode and nothing otherwise.
    pub body: Vec<String>,
}

impl MetadataBlock {
    /// Lines holding structured `key: value` fields
    #[must_use]
    pub fn field_lines(&self) -> &[String] {
        self.frontmatter.as_deref().unwrap_or(&self.body)
    }
}

/// A line consisting solely of `---` plus optional trailing whitespace
#[must_use]
pub fn is_delimiter(line: &str) -> bool {
    line.trim_end() == "---"
}

/// Read the metadata block of `path`.
///
/// # Errors
/// * `ExtractError::Unreadable` if the file cannot be opened.
/// * `ExtractError::Io` if a read fails (including invalid UTF-8).
/// * `ExtractError::FrontmatterTooLarge` if an open frontmatter block runs past
///   [`MAX_FRONTMATTER_LINES`].
pub fn read_block(path: &Path, head_limit: usize, full_text: bool) -> Result<MetadataBlock, ExtractError> {
    let file = File::open(path).map_err(|source| ExtractError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut lines = BufReader::new(file).lines();

    let Some(first) = next_line(&mut lines, path)? else {
        return Ok(MetadataBlock::default());
    };
    let first = first.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(first);

    if is_delimiter(&first) {
        return read_frontmatter(lines, path, full_text);
    }

    let mut body = Vec::new();
    if full_text {
        body.push(first);
        while let Some(line) = next_line(&mut lines, path)? {
            body.push(line);
        }
    } else if head_limit > 0 {
        body.push(first);
        while body.len() < head_limit {
            match next_line(&mut lines, path)? {
                Some(line) => body.push(line),
                None => break,
            }
        }
    }

    Ok(MetadataBlock { frontmatter: None, body })
}

fn read_frontmatter<B: BufRead>(
    mut lines: Lines<B>,
    path: &Path,
    full_text: bool,
) -> Result<MetadataBlock, ExtractError> {
    let mut frontmatter = Vec::new();
    let mut closed = false;

    while let Some(line) = next_line(&mut lines, path)? {
        if is_delimiter(&line) {
            closed = true;
            break;
        }
        if frontmatter.len() == MAX_FRONTMATTER_LINES {
            return Err(ExtractError::FrontmatterTooLarge {
                path: path.to_path_buf(),
                max: MAX_FRONTMATTER_LINES,
            });
        }
        frontmatter.push(line);
    }

    let mut body = Vec::new();
    if closed && full_text {
        while let Some(line) = next_line(&mut lines, path)? {
            body.push(line);
        }
    }

    Ok(MetadataBlock { frontmatter: Some(frontmatter), body })
}

fn next_line<B: BufRead>(lines: &mut Lines<B>, path: &Path) -> Result<Option<String>, ExtractError> {
    lines.next().transpose().map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })
}
