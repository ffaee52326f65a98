//! Filtering and substring search over posts and projects
//!
//! Both collections share the same two gates: an exact tag match (or the
//! [`ALL_TAG`] sentinel) and a case-insensitive substring match of the query
//! against a per-item haystack. Posts come back newest first; projects keep
//! their table order.

mod tags;

pub use tags::{locale_compare, tag_universe};

use crate::content::{sort_newest_first, Document, Project};

/// Tag selector that lets every item through
pub const ALL_TAG: &str = "All";

/// An item that can be filtered and searched
pub trait Searchable {
    fn slug(&self) -> &str;

    fn title(&self) -> &str;

    fn tags(&self) -> &[String];

    /// Text searched by the query, before lower-casing
    fn haystack(&self) -> String;

    /// Items without a slug or a title are never shown
    fn is_displayable(&self) -> bool {
        !self.slug().is_empty() && !self.title().is_empty()
    }
}

impl Searchable for Document {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.meta.title
    }

    fn tags(&self) -> &[String] {
        &self.meta.tags
    }

    fn haystack(&self) -> String {
        [
            self.meta.title.as_str(),
            self.meta.description.as_deref().unwrap_or(""),
            self.meta.tags.join(" ").as_str(),
        ]
        .join(" ")
    }
}

impl Searchable for Project {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn haystack(&self) -> String {
        [
            self.title.as_str(),
            self.outcome.as_str(),
            self.tags.join(" ").as_str(),
            self.tech.join(" ").as_str(),
            self.highlights.join(" ").as_str(),
        ]
        .join(" ")
    }
}

/// A search query plus a tag selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    query: String,
    tag: String,
}

impl Default for Filter {
    fn default() -> Self {
        Self::new("", ALL_TAG)
    }
}

impl Filter {
    /// The query is trimmed and lower-cased once here
    pub fn new(query: &str, tag: &str) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            tag: tag.to_string(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether an item passes both the tag gate and the text gate
    pub fn matches<T: Searchable + ?Sized>(&self, item: &T) -> bool {
        let tag_ok = self.tag == ALL_TAG || item.tags().iter().any(|t| *t == self.tag);
        if !tag_ok {
            return false;
        }
        self.query.is_empty() || item.haystack().to_lowercase().contains(&self.query)
    }

    /// Matching, displayable items in input order
    pub fn apply<'a, T: Searchable>(&self, items: &'a [T]) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| item.is_displayable())
            .filter(|item| self.matches(*item))
            .collect()
    }
}

/// Filter posts, newest first. Equal dates keep input order.
pub fn filter_posts<'a>(posts: &'a [Document], filter: &Filter) -> Vec<&'a Document> {
    let mut matched = filter.apply(posts);
    sort_newest_first(&mut matched, |d| d.meta.date.as_str());
    matched
}

/// Filter projects, preserving table order
pub fn filter_projects<'a>(projects: &'a [Project], filter: &Filter) -> Vec<&'a Project> {
    filter.apply(projects)
}
