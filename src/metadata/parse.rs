//! Line-oriented metadata grammar
//!
//! Deliberately partial: it understands inline `key: value` fields, inline
//! flow lists (`key: [a, b]`), bulleted block lists under an empty `key:`,
//! `#hashtag` tokens, and ATX headings. Nested maps and quoted multi-line
//! scalars are not supported.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

/// Case-folded field name to its values, in file order
pub type FieldMap = HashMap<String, Vec<String>>;

/// Case-folded field name to its values, remembering how each was written
pub type RawFields = HashMap<String, Vec<FieldValue>>;

/// One field value as written in a metadata block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Plain inline value (`key: value`)
    Scalar(String),
    /// Element of a flow list (`key: [a, b]`) or a block list (`- a`)
    Item(String),
}

impl FieldValue {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Scalar(s) | Self::Item(s) => s,
        }
    }

    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Scalar(s) | Self::Item(s) => s,
        }
    }
}

/// Drop the scalar/item distinction once tags have been collected
#[must_use]
pub fn into_field_map(raw: RawFields) -> FieldMap {
    raw.into_iter()
        .map(|(key, values)| (key, values.into_iter().map(FieldValue::into_string).collect()))
        .collect()
}

/// Highest Markdown heading level recognised as a title
const MAX_HEADING_LEVEL: usize = 6;

static FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9_][\w.-]*)\s*:(.*)$").expect("field regex is valid")
});

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w#&/])#(\w[\w/-]*)").expect("hashtag regex is valid"));

/// Parse `key: value` and block-list fields from `lines`.
///
/// Keys are case-folded. A key repeated in the same block accumulates values.
/// The space after the colon is optional, but a value starting with `//` is
/// taken for a URL (`https://...`) and the line is not a field.
#[must_use]
pub fn parse_fields(lines: &[String]) -> RawFields {
    let mut fields = RawFields::new();
    let mut open_list: Option<String> = None;

    for line in lines {
        let trimmed = line.trim();

        if let Some(key) = &open_list {
            if trimmed.is_empty() {
                continue;
            }
            if let Some(item) = trimmed.strip_prefix('-') {
                let item = unquote(item.trim());
                if !item.is_empty() {
                    fields.entry(key.clone()).or_default().push(FieldValue::Item(item.to_string()));
                }
                continue;
            }
            open_list = None;
        }

        let Some(caps) = FIELD_LINE.captures(line) else {
            continue;
        };
        let rest = caps.get(2).map_or("", |m| m.as_str());
        if rest.starts_with("//") {
            continue;
        }
        let key = caps[1].to_lowercase();
        match Some(rest.trim()).filter(|v| !v.is_empty()) {
            Some(value) => {
                let values = fields.entry(key).or_default();
                values.extend(split_inline_value(value));
            }
            None => {
                fields.entry(key.clone()).or_default();
                open_list = Some(key);
            }
        }
    }

    fields
}

/// Split an inline value into one or more values.
///
/// `[a, "b c"]` yields two items, anything else yields the unquoted scalar.
fn split_inline_value(value: &str) -> Vec<FieldValue> {
    let value = value.trim();
    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        return inner
            .split(',')
            .map(|item| unquote(item.trim()))
            .filter(|item| !item.is_empty())
            .map(|item| FieldValue::Item(item.to_string()))
            .collect();
    }
    vec![FieldValue::Scalar(unquote(value).to_string())]
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Normalise the values of a `tags` field into tag names.
///
/// List items are single tags and may contain spaces (`[machine learning]`).
/// A scalar is split on commas and whitespace (`work, urgent`, `#a #b`).
/// Either may carry a leading `#`.
pub fn collect_field_tags(values: &[FieldValue], tags: &mut BTreeSet<String>) {
    let mut insert = |raw: &str| {
        let tag = unquote(raw.trim()).trim_start_matches('#').trim();
        if !tag.is_empty() {
            tags.insert(tag.to_lowercase());
        }
    };
    for value in values {
        match value {
            FieldValue::Item(item) => insert(item.as_str()),
            FieldValue::Scalar(scalar) => scalar
                .split(|c: char| c == ',' || c.is_whitespace())
                .for_each(&mut insert),
        }
    }
}

/// Collect `#word` tokens from `lines` into `tags`, case-folded and without the `#`.
///
/// A `#` directly preceded by a word character (`C#`, `page#anchor`) or
/// followed by whitespace (headings, YAML comments) does not start a tag.
pub fn scan_hashtags<'a, I>(lines: I, tags: &mut BTreeSet<String>)
where
    I: IntoIterator<Item = &'a String>,
{
    for line in lines {
        for caps in HASHTAG.captures_iter(line) {
            let tag = caps[1].trim_end_matches(['/', '-']);
            if !tag.is_empty() {
                tags.insert(tag.to_lowercase());
            }
        }
    }
}

/// Text of the first ATX heading (levels 1 to 6) in `lines`.
#[must_use]
pub fn first_heading(lines: &[String]) -> Option<String> {
    lines.iter().find_map(|line| heading_text(line))
}

fn heading_text(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if !(1..=MAX_HEADING_LEVEL).contains(&level) {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    let text = rest.trim().trim_end_matches('#').trim_end();
    (!text.is_empty()).then(|| text.to_string())
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`), also accepting an RFC 3339
/// date-time, whose date part is used.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = unquote(value.trim());
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}
