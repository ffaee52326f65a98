//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::helpers::today;
use crate::Folio;

/// Scaffold a post named after `title` and dated today.
/// Returns the path of the new file.
pub fn create_post(
    folio: &Folio,
    title: &str,
    tags: &[String],
    summary: Option<&str>,
) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable file name", title);
    }

    let target_dir = &folio.content_dir;
    fs::create_dir_all(target_dir)?;

    let file_path = target_dir.join(format!("{}.{}", slug, folio.config.extension));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        "---\ntitle: \"{}\"\ndate: {}\nsummary: \"{}\"\ntags: [{}]\n---\n\n",
        title.replace('"', "'"),
        today(),
        summary.unwrap_or_default().replace('"', "'"),
        tags.join(", ")
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created {:?}", file_path);

    Ok(file_path)
}

/// Run the new command
pub fn run(folio: &Folio, title: &str, tags: &[String], summary: Option<&str>) -> Result<()> {
    let path = create_post(folio, title, tags, summary)?;
    println!("Created: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StrictFrontMatter;
    use tempfile::TempDir;

    #[test]
    fn test_create_post() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let tags = vec!["AI".to_string(), "Career".to_string()];

        let path = create_post(&folio, "Hello, World!", &tags, Some("First words")).unwrap();
        assert_eq!(path, dir.path().join("content/blog/hello-world.mdx"));

        let raw = fs::read_to_string(&path).unwrap();
        let (fm, body) = StrictFrontMatter::parse(&raw).unwrap();
        assert_eq!(fm.title, "Hello, World!");
        assert_eq!(fm.date, today());
        assert_eq!(fm.summary, "First words");
        assert_eq!(fm.tags, tags);
        assert!(body.is_empty());

        let doc = folio.loader().load_one("hello-world").unwrap().unwrap();
        assert_eq!(doc.meta.title, "Hello, World!");
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        create_post(&folio, "Twice", &[], None).unwrap();
        assert!(create_post(&folio, "Twice", &[], None).is_err());
    }

    #[test]
    fn test_rejects_empty_slug() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert!(create_post(&folio, "???", &[], None).is_err());
    }
}
