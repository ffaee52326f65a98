//! Content loader - loads blog documents from the content directory

use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::document::{sort_newest_first, Document, DocumentMeta};
use super::frontmatter::StrictFrontMatter;
use crate::error::ContentError;
use crate::Folio;

/// Loads documents from a flat directory of source files
#[derive(Debug, Clone)]
pub struct ContentLoader {
    content_dir: PathBuf,
    extension: String,
}

impl ContentLoader {
    /// Create a loader for the site's configured content directory
    pub fn new(folio: &Folio) -> Self {
        Self::with_dir(&folio.content_dir, &folio.config.extension)
    }

    /// Create a loader for an arbitrary directory and file extension
    pub fn with_dir<P: AsRef<Path>>(content_dir: P, extension: &str) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Load every document, newest first.
    ///
    /// Front-matter problems never drop a document; they only fall back to
    /// default metadata.
    pub fn load_all(&self) -> Result<Vec<Document>> {
        if !self.content_dir.exists() {
            tracing::debug!("Content directory {:?} does not exist", self.content_dir);
            return Ok(Vec::new());
        }

        let mut docs = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry
                .with_context(|| format!("Failed to read directory {:?}", self.content_dir))?;
            let path = entry.path();
            if !entry.file_type().is_file() || !self.is_content_file(path) {
                continue;
            }

            let Some(slug) = slug_of(path) else {
                tracing::warn!("Skipping {:?}: file name is not valid UTF-8", path);
                continue;
            };

            let bytes =
                fs::read(path).with_context(|| format!("Failed to read document {:?}", path))?;
            docs.push(Document::from_source(slug, &decode(path, &bytes)));
        }

        sort_newest_first(&mut docs, |d| d.meta.date.as_str());

        tracing::debug!("Loaded {} documents from {:?}", docs.len(), self.content_dir);
        Ok(docs)
    }

    /// Load a single document by slug with the permissive parser.
    ///
    /// A missing file is `Ok(None)`, not an error.
    pub fn load_one(&self, slug: &str) -> Result<Option<Document>> {
        let Some(raw) = self.read_source(slug)? else {
            return Ok(None);
        };
        Ok(Some(Document::from_source(slug, &raw)))
    }

    /// Load a single document by slug with the strict parser.
    ///
    /// A missing file is `Ok(None)`; incomplete front-matter is an error.
    pub fn load_one_strict(&self, slug: &str) -> crate::error::Result<Option<Document>> {
        let Some(raw) = self.read_source(slug)? else {
            return Ok(None);
        };
        let (fm, body) = StrictFrontMatter::parse(&raw)?;
        Ok(Some(Document::new(slug, DocumentMeta::from(fm), body)))
    }

    /// Path a slug maps to
    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.content_dir.join(format!("{}.{}", slug, self.extension))
    }

    fn read_source(&self, slug: &str) -> Result<Option<String>, ContentError> {
        if !is_valid_slug(slug) {
            tracing::debug!("Rejecting slug {:?}", slug);
            return Ok(None);
        }

        let path = self.path_for(slug);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(decode(&path, &bytes).into_owned())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e == self.extension)
            .unwrap_or(false)
    }
}

/// Source text with invalid UTF-8 sequences replaced
fn decode<'a>(path: &Path, bytes: &'a [u8]) -> Cow<'a, str> {
    let text = String::from_utf8_lossy(bytes);
    if matches!(text, Cow::Owned(_)) {
        tracing::warn!("{:?} is not valid UTF-8, decoding lossily", path);
    }
    text
}

/// Slug derived from a file name: the name without its extension
fn slug_of(path: &Path) -> Option<&str> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
}

/// A slug must name a file directly inside the content directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug != "." && slug != ".." && !slug.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SENTINEL_DATE;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let files = [
            (
                "first-steps.mdx",
                "---\ntitle: First Steps\ndate: 2024-01-01\ntags: [Career]\n---\nHello",
            ),
            (
                "fastapi-service.mdx",
                "---\ntitle: Building a FastAPI Service\ndate: 2025-06-15\ntags: Python, FastAPI\n---\nBody",
            ),
            ("undated.mdx", "---\ntags: Notes\n---\nNo date or title here."),
            ("draft.md", "---\ntitle: Wrong extension\ndate: 2030-01-01\n---\n"),
        ];
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        fs::create_dir(dir.path().join("nested.mdx")).unwrap();
        dir
    }

    #[test]
    fn test_load_all_sorted_newest_first() {
        let dir = fixture();
        let loader = ContentLoader::with_dir(dir.path(), "mdx");
        let docs = loader.load_all().unwrap();

        let dates: Vec<_> = docs.iter().map(|d| d.meta.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-06-15", "2024-01-01", SENTINEL_DATE]);
    }

    #[test]
    fn test_load_all_title_falls_back_to_slug() {
        let dir = fixture();
        let loader = ContentLoader::with_dir(dir.path(), ".mdx");
        let docs = loader.load_all().unwrap();

        let undated = docs.iter().find(|d| d.slug == "undated").unwrap();
        assert_eq!(undated.meta.title, "undated");
        assert_eq!(undated.meta.tags, vec!["Notes"]);
    }

    #[test]
    fn test_load_all_missing_dir() {
        let dir = TempDir::new().unwrap();
        let loader = ContentLoader::with_dir(dir.path().join("missing"), "mdx");
        assert!(loader.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_load_one() {
        let dir = fixture();
        let loader = ContentLoader::with_dir(dir.path(), "mdx");

        let doc = loader.load_one("fastapi-service").unwrap().unwrap();
        assert_eq!(doc.meta.title, "Building a FastAPI Service");
        assert_eq!(doc.meta.tags, vec!["Python", "FastAPI"]);
        assert_eq!(doc.body, "Body");

        assert!(loader.load_one("does-not-exist").unwrap().is_none());
        assert!(loader.load_one("../first-steps").unwrap().is_none());
        assert!(loader.load_one("").unwrap().is_none());
    }

    #[test]
    fn test_load_one_strict() {
        let dir = fixture();
        fs::write(
            dir.path().join("complete.mdx"),
            "---\ntitle: Complete\ndate: 2025-01-01\nsummary: All fields\n---\nBody",
        )
        .unwrap();
        let loader = ContentLoader::with_dir(dir.path(), "mdx");

        let doc = loader.load_one_strict("complete").unwrap().unwrap();
        assert_eq!(doc.meta.description.as_deref(), Some("All fields"));

        assert!(loader.load_one_strict("missing").unwrap().is_none());

        let err = loader.load_one_strict("first-steps").unwrap_err();
        assert!(matches!(err, ContentError::MissingField("summary")));
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("good.mdx"),
            "---\ntitle: Good\ndate: 2025-01-01\n---\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("latin1.mdx"),
            b"---\ntitle: Caf\xe9\ndate: 2024-01-01\nsummary: Menu\n---\nCr\xe8me",
        )
        .unwrap();
        let loader = ContentLoader::with_dir(dir.path(), "mdx");

        let docs = loader.load_all().unwrap();
        let slugs: Vec<_> = docs.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["good", "latin1"]);
        assert_eq!(docs[1].meta.title, "Caf\u{FFFD}");
        assert_eq!(docs[1].meta.date, "2024-01-01");

        let doc = loader.load_one("latin1").unwrap().unwrap();
        assert_eq!(doc.body, "Cr\u{FFFD}me");
        let doc = loader.load_one_strict("latin1").unwrap().unwrap();
        assert_eq!(doc.meta.title, "Caf\u{FFFD}");
    }

    #[test]
    fn test_equal_dates_keep_file_name_order() {
        let dir = TempDir::new().unwrap();
        for name in ["b.mdx", "c.mdx", "a.mdx"] {
            let date = if name == "c.mdx" { "2025-02-01" } else { "2025-01-01" };
            fs::write(
                dir.path().join(name),
                format!("---\ntitle: {}\ndate: {}\n---\n", name, date),
            )
            .unwrap();
        }
        let loader = ContentLoader::with_dir(dir.path(), "mdx");

        let docs = loader.load_all().unwrap();
        let slugs: Vec<_> = docs.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["c", "a", "b"]);
    }
}
