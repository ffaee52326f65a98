//! Front-matter parsing
//!
//! Documents open with a `---` line, followed by `key: value` lines, closed by
//! another `---` line. Two readers share that convention:
//!
//! * [`FrontMatter::parse`] is used when listing content. It never fails; a
//!   missing or unterminated block yields empty metadata and the raw text.
//! * [`StrictFrontMatter::parse`] is used when a single document is compiled
//!   in full, and rejects anything incomplete.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{ContentError, Result};

/// Opening delimiter of a front-matter block
pub const DELIMITER: &str = "---";

/// Closing delimiter, searched for after the opening one
const CLOSING: &str = "\n---";

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FrontValue {
    /// A scalar, already trimmed and unquoted
    Text(String),
    /// An inline `[a, b, c]` sequence
    List(Vec<String>),
}

impl FrontValue {
    /// Render the value as plain text. Lists are joined with `,`.
    pub fn as_text(&self) -> String {
        match self {
            FrontValue::Text(s) => s.clone(),
            FrontValue::List(items) => items.join(","),
        }
    }
}

/// Ordered key/value metadata. A repeated key keeps its first position and
/// its last value.
pub type Metadata = IndexMap<String, FrontValue>;

/// Front-matter read by the permissive parser
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrontMatter {
    pub fields: Metadata,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body)
    ///
    /// When the block is absent or never closed, the metadata is empty and
    /// the body is `raw` itself, untouched.
    pub fn parse(raw: &str) -> (Self, &str) {
        let trimmed = trim_leading(raw);

        let Some(rest) = trimmed.strip_prefix(DELIMITER) else {
            return (FrontMatter::default(), raw);
        };

        let Some((block, body)) = split_block(rest) else {
            return (FrontMatter::default(), raw);
        };

        let mut fields = Metadata::new();
        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }

            let value = strip_quotes(value.trim());
            let value = match inline_list(value) {
                Some(items) => FrontValue::List(items),
                None => FrontValue::Text(value.to_string()),
            };
            fields.insert(key.to_string(), value);
        }

        (Self { fields }, body)
    }

    /// Look up a field by key
    pub fn get(&self, key: &str) -> Option<&FrontValue> {
        self.fields.get(key)
    }

    /// Look up a field as text; empty values count as absent
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(FrontValue::as_text)
            .filter(|value| !value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Front-matter read by the strict parser. All of `title`, `date` and
/// `summary` are guaranteed to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrictFrontMatter {
    pub title: String,
    pub date: String,
    pub summary: String,
    pub tags: Vec<String>,
}

impl StrictFrontMatter {
    /// Parse front-matter, failing on a missing or unclosed block and on any
    /// missing required field. Lines without a colon are ignored.
    pub fn parse(raw: &str) -> Result<(Self, &str)> {
        let trimmed = trim_leading(raw);
        let rest = trimmed
            .strip_prefix(DELIMITER)
            .ok_or(ContentError::MissingFrontmatter)?;
        let (block, body) = split_block(rest).ok_or(ContentError::UnclosedFrontmatter)?;

        let mut fields: IndexMap<&str, &str> = IndexMap::new();
        for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some((key, value)) = line.split_once(':') {
                fields.insert(key.trim(), value.trim());
            }
        }

        let field = |key: &str| strip_double_quotes(fields.get(key).copied().unwrap_or("")).trim();
        let required = |key: &'static str| -> Result<String> {
            match field(key) {
                "" => Err(ContentError::MissingField(key)),
                value => Ok(value.to_string()),
            }
        };

        let title = required("title")?;
        let date = required("date")?;
        let summary = required("summary")?;

        let tags_raw = fields.get("tags").copied().unwrap_or("").trim();
        let tags_inner = tags_raw
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(tags_raw);
        let tags = tags_inner
            .split(',')
            .map(|t| strip_double_quotes(t.trim()))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        Ok((
            Self {
                title,
                date,
                summary,
                tags,
            },
            body,
        ))
    }
}

/// Drop a byte-order mark and leading whitespace
fn trim_leading(raw: &str) -> &str {
    raw.trim_start_matches(|c: char| c == '\u{FEFF}' || c.is_whitespace())
}

/// Split the text following the opening delimiter into the metadata block and
/// the body. The body starts after the closing delimiter, leading whitespace
/// removed.
fn split_block(rest: &str) -> Option<(&str, &str)> {
    let end = rest.find(CLOSING)?;
    let block = rest[..end].trim();
    let body = rest[end + CLOSING.len()..].trim_start();
    Some((block, body))
}

/// Strip one layer of matching straight quotes
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Strip a leading and a trailing `"`, each independently
fn strip_double_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// Parse `[a, b, c]` into its elements
fn inline_list(value: &str) -> Option<Vec<String>> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?.trim();
    if inner.is_empty() {
        return Some(Vec::new());
    }
    Some(
        inner
            .split(',')
            .map(|item| strip_quotes(item.trim()).to_string())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = r#"---
title: Building a FastAPI Service
date: 2025-06-15
tags: [Python, "FastAPI", 'APIs']
description: Notes from shipping a small service
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.text("title").as_deref(), Some("Building a FastAPI Service"));
        assert_eq!(fm.text("date").as_deref(), Some("2025-06-15"));
        assert_eq!(
            fm.get("tags"),
            Some(&FrontValue::List(vec![
                "Python".to_string(),
                "FastAPI".to_string(),
                "APIs".to_string()
            ]))
        );
        assert_eq!(body, "This is the content.\n");
    }

    #[test]
    fn test_no_delimiter_returns_raw() {
        let content = "  # Just markdown\n\ntitle: not metadata\n";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_block_returns_raw() {
        let content = "---\ntitle: Dangling\ndate: 2024-01-01\n\nNo closing line.";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_lines_without_colon_are_skipped() {
        let content = "---\ntitle: Kept\njust some words\ndate: 2024-01-01\n---\nBody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.fields.len(), 2);
        assert_eq!(fm.text("title").as_deref(), Some("Kept"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_value_split_on_first_colon() {
        let content = "---\ntitle: Ratio 3:2 explained\n---\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.text("title").as_deref(), Some("Ratio 3:2 explained"));
    }

    #[test]
    fn test_quotes_stripped_once() {
        let content = "---\ntitle: \"'Quoted'\"\nsummary: \"half\n---\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.text("title").as_deref(), Some("'Quoted'"));
        assert_eq!(fm.text("summary").as_deref(), Some("\"half"));
    }

    #[test]
    fn test_quoted_list_is_still_a_list() {
        let content = "---\ntags: \"[a, b]\"\n---\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(
            fm.get("tags"),
            Some(&FrontValue::List(vec!["a".to_string(), "b".to_string()]))
        );
    }

    #[test]
    fn test_empty_list() {
        let content = "---\ntags: [ ]\n---\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.get("tags"), Some(&FrontValue::List(Vec::new())));
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\ndate: 2024-02-02\r\n---\r\nBody\r\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.text("title").as_deref(), Some("Windows"));
        assert_eq!(fm.text("date").as_deref(), Some("2024-02-02"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_strict_parse() {
        let content = r#"---
title: "Career Notes"
date: 2025-12-19
summary: What I learned this year
tags: Tech, Data,
---
Body text
"#;
        let (fm, body) = StrictFrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Career Notes");
        assert_eq!(fm.date, "2025-12-19");
        assert_eq!(fm.summary, "What I learned this year");
        assert_eq!(fm.tags, vec!["Tech", "Data"]);
        assert_eq!(body, "Body text\n");
    }

    #[test]
    fn test_strict_missing_opening() {
        let err = StrictFrontMatter::parse("title: x\n").unwrap_err();
        assert!(matches!(err, ContentError::MissingFrontmatter));
    }

    #[test]
    fn test_strict_unclosed_vs_permissive() {
        let content = "---\ntitle: x\ndate: 2024-01-01\nsummary: s\n";
        let err = StrictFrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, ContentError::UnclosedFrontmatter));

        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_strict_missing_field() {
        let content = "---\ntitle: x\ndate: 2024-01-01\n---\nBody";
        let err = StrictFrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, ContentError::MissingField("summary")));
    }

    #[test]
    fn test_strict_bracket_tags() {
        let content = "---\ntitle: x\ndate: 2024-01-01\nsummary: s\ntags: [\"A\", B]\n---\n";
        let (fm, _) = StrictFrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["A", "B"]);
    }

    #[test]
    fn test_byte_order_mark() {
        let content = "\u{FEFF}---\ntitle: With BOM\ndate: 2025-01-01\nsummary: s\n---\nBody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.text("title").as_deref(), Some("With BOM"));
        assert_eq!(fm.text("date").as_deref(), Some("2025-01-01"));
        assert_eq!(body, "Body");

        let (fm, body) = StrictFrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "With BOM");
        assert_eq!(body, "Body");
    }
}
