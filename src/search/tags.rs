//! Tag universe: the tag buttons offered above a list

use std::cmp::Ordering;
use std::collections::HashSet;

use super::{Searchable, ALL_TAG};

/// Every selectable tag for a collection.
///
/// The union of `allowed` and all item tags, trimmed, with empty and
/// duplicate entries removed, sorted with [`locale_compare`], and prefixed
/// with [`ALL_TAG`].
pub fn tag_universe<T, S>(items: &[T], allowed: &[S]) -> Vec<String>
where
    T: Searchable,
    S: AsRef<str>,
{
    // ALL_TAG is always first, never sorted in with the rest
    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(ALL_TAG);
    let mut tags: Vec<String> = allowed
        .iter()
        .map(AsRef::<str>::as_ref)
        .chain(items.iter().flat_map(|item| item.tags().iter().map(String::as_str)))
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && seen.insert(*tag))
        .map(str::to_string)
        .collect();

    tags.sort_by(|a, b| locale_compare(a, b));
    tags.insert(0, ALL_TAG.to_string());
    tags
}

/// Dictionary-style ordering: letters compare case-insensitively first, then
/// lower case sorts before upper case, then raw code points break any tie.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .find(|(x, y)| x != y)
                .map(|(x, y)| y.is_lowercase().cmp(&x.is_lowercase()))
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{projects, Document};

    #[test]
    fn test_universe_for_projects() {
        let none: &[&str] = &[];
        let tags = tag_universe(projects(), none);
        assert_eq!(tags[0], ALL_TAG);
        assert!(tags.contains(&"Fraud".to_string()));
        assert_eq!(
            tags.iter().filter(|t| t.as_str() == "Full-stack").count(),
            1
        );
        assert_eq!(tags.len(), 1 + 15);
    }

    #[test]
    fn test_universe_merges_allow_list() {
        let docs = vec![
            Document::from_source("a", "---\ntags: [data, AI, Career]\n---\n"),
            Document::from_source("b", "---\ntags: [AI,  , ai]\n---\n"),
        ];
        let tags = tag_universe(&docs, &[" Career ", "Zen", ""]);
        assert_eq!(tags, vec!["All", "ai", "AI", "Career", "data", "Zen"]);
    }

    #[test]
    fn test_universe_lists_all_once() {
        let docs = vec![Document::from_source("a", "---\ntags: [All, AI]\n---\n")];
        let tags = tag_universe(&docs, &["All"]);
        assert_eq!(tags, vec!["All", "AI"]);
    }

    #[test]
    fn test_universe_is_idempotent() {
        let none: &[String] = &[];
        let first = tag_universe(projects(), none);
        let second = tag_universe(projects(), none);
        assert_eq!(first, second);
    }

    #[test]
    fn test_locale_compare() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("ai", "AI"), Ordering::Less);
        assert_eq!(locale_compare("Maps", "maps"), Ordering::Greater);
        assert_eq!(locale_compare("UI", "UI"), Ordering::Equal);
    }
}
