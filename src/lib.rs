//! folio: content pipeline for a portfolio and blog site
//!
//! Loads MDX posts from a content directory, parses their front matter,
//! compiles bodies to HTML with component slots, and filters posts and
//! projects by tag and free-text query.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod search;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Post source directory
    pub content_dir: PathBuf,
}

impl Folio {
    /// Open the site in `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = config::SiteConfig::load_or_default(&base_dir)?;
        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Loader for this site's posts
    pub fn loader(&self) -> content::ContentLoader {
        content::ContentLoader::new(self)
    }

    /// Renderer configured from the `highlight` section
    pub fn renderer(&self) -> content::MdxRenderer {
        let highlight = &self.config.highlight;
        content::MdxRenderer::with_options(&highlight.theme, highlight.line_number)
    }

    /// All tags offered for posts: the configured allow-list plus every post tag
    pub fn post_tags(&self, posts: &[content::Document]) -> Vec<String> {
        search::tag_universe(posts, &self.config.allowed_tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_without_config() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.content_dir, dir.path().join("content/blog"));
        assert!(folio.loader().load_all().unwrap().is_empty());
    }

    #[test]
    fn test_new_with_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "content_dir: posts\nextension: md\nallowed_tags: [Zen]\n",
        )
        .unwrap();
        fs::create_dir(dir.path().join("posts")).unwrap();
        fs::write(
            dir.path().join("posts/hello.md"),
            "---\ntitle: Hello\ndate: 2025-01-01\ntags: [AI]\n---\nHi\n",
        )
        .unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        let posts = folio.loader().load_all().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].meta.title, "Hello");
        assert_eq!(folio.post_tags(&posts), vec!["All", "AI", "Zen"]);
    }
}
