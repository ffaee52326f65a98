//! Show a single project

use anyhow::Result;
use std::fmt::Write;

use crate::content::{find_project, Project};

/// Print one project. Returns `false` when no project has that slug.
pub fn run(slug: &str, json: bool) -> Result<bool> {
    let Some(project) = find_project(slug) else {
        eprintln!("Project not found: {}", slug);
        return Ok(false);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(project)?);
    } else {
        print!("{}", describe(project)?);
    }
    Ok(true)
}

/// Plain-text project card
pub fn describe(project: &Project) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "# {}", project.title)?;
    writeln!(out, "{}", project.outcome)?;
    writeln!(out)?;
    writeln!(out, "tags: {}", project.tags.join(", "))?;
    writeln!(out, "tech: {}", project.tech.join(", "))?;
    writeln!(out, "github: {}", project.github)?;
    if let Some(cover) = project.cover() {
        writeln!(out, "cover: {}", cover)?;
    }
    if !project.highlights.is_empty() {
        writeln!(out, "\nHighlights:")?;
        for highlight in &project.highlights {
            writeln!(out, "  - {}", highlight)?;
        }
    }
    Ok(out)
}
