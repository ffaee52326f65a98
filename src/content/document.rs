//! Document model

use serde::{Deserialize, Serialize};

use super::frontmatter::{FrontMatter, FrontValue, StrictFrontMatter};

/// Date substituted when a document declares none. It sorts after every
/// real `YYYY-MM-DD` date when ordering newest first.
pub const SENTINEL_DATE: &str = "1970-01-01";

/// Normalized document metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Title, falls back to the slug
    pub title: String,

    /// Publication date as `YYYY-MM-DD`, or [`SENTINEL_DATE`]
    pub date: String,

    /// Tags in source order, duplicates kept
    #[serde(default)]
    pub tags: Vec<String>,

    /// Summary line, read from `description` or `summary`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DocumentMeta {
    /// Normalize permissively parsed front-matter
    pub fn from_front_matter(slug: &str, fm: &FrontMatter) -> Self {
        Self {
            title: fm.text("title").unwrap_or_else(|| slug.to_string()),
            date: fm.text("date").unwrap_or_else(|| SENTINEL_DATE.to_string()),
            tags: normalize_tags(fm.get("tags")),
            description: fm.text("description").or_else(|| fm.text("summary")),
        }
    }
}

impl From<StrictFrontMatter> for DocumentMeta {
    fn from(fm: StrictFrontMatter) -> Self {
        Self {
            title: fm.title,
            date: fm.date,
            tags: fm.tags,
            description: Some(fm.summary),
        }
    }
}

/// A blog post loaded from a single source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// File name without extension
    pub slug: String,

    #[serde(flatten)]
    pub meta: DocumentMeta,

    /// Raw body after the front-matter, compiled on demand
    #[serde(default, skip_serializing)]
    pub body: String,
}

impl Document {
    pub fn new(slug: impl Into<String>, meta: DocumentMeta, body: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            meta,
            body: body.into(),
        }
    }

    /// Build a document from raw source text using the permissive parser
    pub fn from_source(slug: &str, raw: &str) -> Self {
        let (fm, body) = FrontMatter::parse(raw);
        let meta = DocumentMeta::from_front_matter(slug, &fm);
        Self::new(slug, meta, body)
    }

    /// The newer neighbour in a newest-first list
    pub fn prev<'a>(&self, docs: &'a [Document]) -> Option<&'a Document> {
        let pos = docs.iter().position(|d| d.slug == self.slug)?;
        pos.checked_sub(1).and_then(|i| docs.get(i))
    }

    /// The older neighbour in a newest-first list
    pub fn next<'a>(&self, docs: &'a [Document]) -> Option<&'a Document> {
        let pos = docs.iter().position(|d| d.slug == self.slug)?;
        docs.get(pos + 1)
    }
}

/// Normalize a `tags` value.
///
/// Lists are taken as-is. A string containing a comma is split and trimmed,
/// dropping empty segments; any other non-empty string is a single tag.
pub fn normalize_tags(value: Option<&FrontValue>) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(FrontValue::List(items)) => items.clone(),
        Some(FrontValue::Text(text)) if text.contains(',') => text
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        Some(FrontValue::Text(text)) if text.is_empty() => Vec::new(),
        Some(FrontValue::Text(text)) => vec![text.clone()],
    }
}

/// Order newest first by comparing `YYYY-MM-DD` strings. The sort is stable,
/// so equal dates keep their current relative order.
pub fn sort_newest_first<T, F>(items: &mut [T], date: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| date(b).cmp(date(a)));
}
