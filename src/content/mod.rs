//! Content module - documents, front-matter, MDX compilation and projects

mod document;
mod frontmatter;
pub mod loader;
mod markdown;
mod projects;

pub use document::{normalize_tags, sort_newest_first, Document, DocumentMeta, SENTINEL_DATE};
pub use frontmatter::{FrontMatter, FrontValue, Metadata, StrictFrontMatter};
pub use loader::ContentLoader;
pub use markdown::{Component, Components, Element, MdxContent, MdxRenderer, Props};
pub use projects::{find_project, projects, Project};
