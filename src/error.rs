//! Error types for content parsing and compilation

use thiserror::Error;

/// Result alias for operations that fail with a [`ContentError`]
pub type Result<T> = std::result::Result<T, ContentError>;

/// Failures surfaced by the strict content paths.
///
/// The bulk listing path never produces these: malformed frontmatter there
/// degrades to defaults instead.
#[derive(Error, Debug)]
pub enum ContentError {
    /// The document does not open with `---`.
    #[error("Missing frontmatter. Add --- at the top of the MDX file.")]
    MissingFrontmatter,

    /// The opening `---` has no matching closing line.
    #[error("Frontmatter not closed. Add --- to close it.")]
    UnclosedFrontmatter,

    /// A required frontmatter field is absent or empty.
    #[error("Frontmatter must include title, date, summary (and optionally tags). Missing: {0}")]
    MissingField(&'static str),

    /// A `{` expression was opened and never closed.
    #[error("Could not parse expression: unclosed `{{` starting on line {line}")]
    UnclosedExpression { line: usize },

    /// A closing component tag did not match the innermost open one.
    #[error("Unexpected closing tag `</{found}>` on line {line}, expected {expected}")]
    UnexpectedClosingTag {
        found: String,
        expected: String,
        line: usize,
    },

    /// A component was opened and never closed.
    #[error("Expected a closing tag for `<{0}>` before the end of the document")]
    UnclosedComponent(String),

    /// The compiled document references a component nobody provided.
    #[error("Expected component `{0}` to be defined: you likely forgot to pass it")]
    MissingComponent(String),

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
