//! Filter posts or projects by tag and query

use anyhow::Result;

use super::list::{post_lines, project_lines};
use crate::content::projects;
use crate::search::{filter_posts, filter_projects, Filter};
use crate::Folio;

/// Search a collection and print the matches
pub fn run(folio: &Folio, collection: &str, filter: &Filter, json: bool) -> Result<()> {
    print!("{}", render(folio, collection, filter, json)?);
    Ok(())
}

pub fn render(folio: &Folio, collection: &str, filter: &Filter, json: bool) -> Result<String> {
    tracing::debug!(
        "Searching {} for {:?} in tag {:?}",
        collection,
        filter.query(),
        filter.tag()
    );

    match collection {
        "post" | "posts" => {
            let posts = folio.loader().load_all()?;
            let matched = filter_posts(&posts, filter);
            if json {
                return Ok(serde_json::to_string_pretty(&matched)? + "\n");
            }
            let heading = format!("Posts ({} of {}):", matched.len(), posts.len());
            Ok(post_lines(folio, &heading, matched.into_iter()))
        }
        "project" | "projects" => {
            let all = projects();
            let matched = filter_projects(all, filter);
            if json {
                return Ok(serde_json::to_string_pretty(&matched)? + "\n");
            }
            let heading = format!("Projects ({} of {}):", matched.len(), all.len());
            Ok(project_lines(&heading, matched.into_iter()))
        }
        _ => {
            anyhow::bail!(
                "Unknown collection: {}. Available: posts, projects",
                collection
            );
        }
    }
}
