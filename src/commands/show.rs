//! Compile one post and print its HTML

use anyhow::Result;

use crate::content::{Components, Document, Element, MdxContent};
use crate::helpers::format_display_date;
use crate::Folio;

/// Print the compiled post. Returns `false` when no post has that slug.
pub fn run(folio: &Folio, slug: &str, strict: bool) -> Result<bool> {
    match render(folio, slug, strict)? {
        Some(out) => {
            print!("{}", out);
            Ok(true)
        }
        None => {
            eprintln!("Post not found: {}", slug);
            Ok(false)
        }
    }
}

/// Compiled page for `slug`, or `None` when it does not exist
pub fn render(folio: &Folio, slug: &str, strict: bool) -> Result<Option<String>> {
    let loader = folio.loader();
    let doc = if strict {
        loader.load_one_strict(slug)?
    } else {
        loader.load_one(slug)?
    };
    let Some(doc) = doc else {
        return Ok(None);
    };

    let content = folio.renderer().compile(&doc.body)?;
    let html = content.render(&preview_components(&content))?;

    let posts = loader.load_all()?;
    Ok(Some(page(folio, &doc, &posts, &html)))
}

/// Every component the document uses, stood in by a `div` with the
/// component's name as its class
fn preview_components(content: &MdxContent) -> Components {
    let mut components = Components::new();
    for name in content.component_names() {
        components.insert(name, Element::new("div").class(&name.to_lowercase()));
    }
    components
}

fn page(folio: &Folio, doc: &Document, posts: &[Document], html: &str) -> String {
    let mut out = format!(
        "# {}\n{}\n",
        doc.meta.title,
        format_display_date(&doc.meta.date, &folio.config.date_format)
    );
    if !doc.meta.tags.is_empty() {
        out.push_str(&format!("tags: {}\n", doc.meta.tags.join(", ")));
    }
    if let Some(description) = &doc.meta.description {
        out.push_str(&format!("{}\n", description));
    }
    out.push('\n');
    out.push_str(html);
    if !html.ends_with('\n') {
        out.push('\n');
    }

    if let Some(prev) = doc.prev(posts) {
        out.push_str(&format!("\n<- newer: {} [{}]", prev.meta.title, prev.slug));
    }
    if let Some(next) = doc.next(posts) {
        out.push_str(&format!("\n-> older: {} [{}]", next.meta.title, next.slug));
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
