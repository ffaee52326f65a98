//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::content::{projects, Document, Project};
use crate::helpers::format_display_date;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str, json: bool) -> Result<()> {
    print!("{}", render(folio, content_type, json)?);
    Ok(())
}

/// Build the listing for `content_type` as text or JSON
pub fn render(folio: &Folio, content_type: &str, json: bool) -> Result<String> {
    match content_type {
        "post" | "posts" => {
            let posts = folio.loader().load_all()?;
            if json {
                return Ok(serde_json::to_string_pretty(&posts)? + "\n");
            }
            Ok(post_lines(folio, &format!("Posts ({}):", posts.len()), posts.iter()))
        }
        "project" | "projects" => {
            let all = projects();
            if json {
                return Ok(serde_json::to_string_pretty(all)? + "\n");
            }
            Ok(project_lines(&format!("Projects ({}):", all.len()), all.iter()))
        }
        "tag" | "tags" => {
            let posts = folio.loader().load_all()?;
            let tags = folio.post_tags(&posts);
            if json {
                return Ok(serde_json::to_string_pretty(&tags)? + "\n");
            }
            let mut out = format!("Tags ({}):\n", tags.len().saturating_sub(1));
            for tag in tags.iter().skip(1) {
                let count = posts.iter().filter(|p| p.meta.tags.contains(tag)).count();
                writeln!(out, "  {} ({})", tag, count)?;
            }
            Ok(out)
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, projects, tags",
                content_type
            );
        }
    }
}

pub(crate) fn post_lines<'a>(
    folio: &Folio,
    heading: &str,
    posts: impl Iterator<Item = &'a Document>,
) -> String {
    let mut out = format!("{}\n", heading);
    for post in posts {
        let date = format_display_date(&post.meta.date, &folio.config.date_format);
        let _ = write!(out, "  {} - {} [{}]", date, post.meta.title, post.slug);
        if !post.meta.tags.is_empty() {
            let _ = write!(out, " #{}", post.meta.tags.join(" #"));
        }
        out.push('\n');
    }
    out
}

pub(crate) fn project_lines<'a>(
    heading: &str,
    projects: impl Iterator<Item = &'a Project>,
) -> String {
    let mut out = format!("{}\n", heading);
    for project in projects {
        let _ = writeln!(
            out,
            "  {} [{}] {}",
            project.title,
            project.slug,
            project.tags.join(", ")
        );
    }
    out
}
