//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub url: String,

    // Content
    /// Directory holding post sources, relative to the base directory
    pub content_dir: String,
    /// Source file extension, without the dot
    pub extension: String,
    /// Tags offered for filtering even when no post uses them yet
    pub allowed_tags: Vec<String>,

    // Date format (Moment.js style)
    pub date_format: String,

    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            author: String::new(),
            url: "http://localhost:3000".to_string(),

            content_dir: "content/blog".to_string(),
            extension: "mdx".to_string(),
            allowed_tags: Vec::new(),

            date_format: "MMM DD, YYYY".to_string(),

            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }

    /// Load `_config.yml` from `base_dir`, or defaults when there is none
    pub fn load_or_default<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let path = base_dir.as_ref().join("_config.yml");
        if path.exists() {
            tracing::debug!("Loading config from {:?}", path);
            Self::load(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }
}

/// Code block highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "InspiredGitHub".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content/blog");
        assert_eq!(config.extension, "mdx");
        assert_eq!(config.date_format, "MMM DD, YYYY");
        assert!(config.allowed_tags.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Portfolio
author: Test User
allowed_tags: [AI, Career]
highlight:
  line_number: true
analytics: plausible
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Portfolio");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.allowed_tags, vec!["AI", "Career"]);
        assert!(config.highlight.line_number);
        assert_eq!(config.highlight.theme, "InspiredGitHub");
        assert_eq!(config.extension, "mdx");
        assert!(config.extra.contains_key("analytics"));
    }

    #[test]
    fn test_load_or_default() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.title, "Portfolio");

        fs::write(dir.path().join("_config.yml"), "content_dir: posts\n").unwrap();
        let config = SiteConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.content_dir, "posts");

        fs::write(dir.path().join("_config.yml"), "title: [unclosed\n").unwrap();
        assert!(SiteConfig::load_or_default(dir.path()).is_err());
    }
}
