//! MDX compilation with syntax highlighting
//!
//! Markdown is handled by `pulldown-cmark`. On top of it the compiler
//! understands the parts of MDX that matter for authored posts:
//!
//! * top-level `import` / `export` lines are collected and not rendered,
//! * `{/* comments */}` are dropped, other `{expressions}` stay as text,
//! * capitalized JSX tags such as `<Callout kind="info">` become component
//!   slots, filled at render time from a [`Components`] registry.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::collections::HashMap;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::frontmatter::StrictFrontMatter;
use crate::error::{ContentError, Result};

lazy_static! {
    static ref COMPONENT_TAG: Regex =
        Regex::new(r"<(/?)([A-Z][A-Za-z0-9_.]*)(\s[^>]*?)?\s*(/?)>").unwrap();
    static ref ATTRIBUTE: Regex = Regex::new(
        r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|\{([^}]*)\}))?"#
    )
    .unwrap();
}

/// Marks a component slot in the intermediate HTML
const SLOT_OPEN: char = '\u{E000}';
const SLOT_CLOSE: char = '\u{E001}';

/// Component attributes, in source order. Bare attributes map to `"true"`,
/// `{expr}` attributes keep the raw expression text.
pub type Props = IndexMap<String, String>;

/// Something that can stand in for a JSX component when rendering
pub trait Component: Send + Sync {
    /// Markup emitted for the opening tag
    fn open(&self, props: &Props) -> String;

    /// Markup emitted for the closing tag
    fn close(&self) -> String {
        String::new()
    }
}

impl<F> Component for F
where
    F: Fn(&Props) -> String + Send + Sync,
{
    fn open(&self, props: &Props) -> String {
        self(props)
    }
}

/// A component rendered as a plain HTML element, props becoming `data-`
/// attributes
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    class: Option<String>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            class: None,
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }
}

impl Component for Element {
    fn open(&self, props: &Props) -> String {
        let mut out = format!("<{}", self.tag);
        if let Some(class) = &self.class {
            out.push_str(&format!(r#" class="{}""#, html_escape(class)));
        }
        for (name, value) in props {
            out.push_str(&format!(
                r#" data-{}="{}""#,
                name.to_ascii_lowercase(),
                html_escape(value)
            ));
        }
        out.push('>');
        out
    }

    fn close(&self) -> String {
        format!("</{}>", self.tag)
    }
}

/// Components available to a render call, keyed by tag name
#[derive(Default)]
pub struct Components {
    entries: HashMap<String, Box<dyn Component>>,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component, replacing any previous one with the same name
    pub fn insert<C: Component + 'static>(&mut self, name: &str, component: C) {
        self.entries.insert(name.to_string(), Box::new(component));
    }

    pub fn with<C: Component + 'static>(mut self, name: &str, component: C) -> Self {
        self.insert(name, component);
        self
    }

    fn resolve(&self, name: &str) -> Result<&dyn Component> {
        self.entries
            .get(name)
            .map(|c| c.as_ref())
            .ok_or_else(|| ContentError::MissingComponent(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Html(String),
    Open { name: String, props: Props },
    Close { name: String },
    Void { name: String, props: Props },
}

/// A compiled document, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MdxContent {
    segments: Vec<Segment>,
    esm: Vec<String>,
}

impl MdxContent {
    /// Render to HTML, resolving components from `components`
    pub fn render(&self, components: &Components) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Html(html) => out.push_str(html),
                Segment::Open { name, props } => {
                    out.push_str(&components.resolve(name)?.open(props))
                }
                Segment::Close { name } => out.push_str(&components.resolve(name)?.close()),
                Segment::Void { name, props } => {
                    let component = components.resolve(name)?;
                    out.push_str(&component.open(props));
                    out.push_str(&component.close());
                }
            }
        }
        Ok(out)
    }

    /// Render with no components registered. Fails if the document uses any.
    pub fn to_html(&self) -> Result<String> {
        self.render(&Components::default())
    }

    /// Component names in order of first use
    pub fn component_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            let name = match segment {
                Segment::Open { name, .. } | Segment::Void { name, .. } => name.as_str(),
                _ => continue,
            };
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// `import` / `export` lines found at the top level
    pub fn esm(&self) -> &[String] {
        &self.esm
    }
}

/// MDX compiler with syntax highlighting
pub struct MdxRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MdxRenderer {
    /// Create a new renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", true)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Compile a full source document: strict front-matter, then the body
    pub fn compile_document(&self, raw: &str) -> Result<(StrictFrontMatter, MdxContent)> {
        let (fm, body) = StrictFrontMatter::parse(raw)?;
        let content = self.compile(body)?;
        Ok((fm, content))
    }

    /// Compile a document body
    pub fn compile(&self, body: &str) -> Result<MdxContent> {
        let result = self.compile_inner(body);
        if let Err(e) = &result {
            tracing::debug!("MDX compilation failed: {}", e);
        }
        result
    }

    fn compile_inner(&self, body: &str) -> Result<MdxContent> {
        let source = preprocess(body)?;

        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_DEFINITION_LIST
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(&source.text, options);

        let mut events: Vec<Event> = Vec::new();
        let mut slots: Vec<Segment> = Vec::new();
        let mut open: Vec<String> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for (event, range) in parser.into_offset_iter() {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split(|c: char| c.is_whitespace() || c == ',')
                            .next()
                            .filter(|l| !l.is_empty())
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight_code(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                Event::Html(raw) | Event::InlineHtml(raw) => {
                    let line = line_of(&source.text, range.start);
                    let html = extract_components(&raw, line, &mut slots, &mut open)?;
                    events.push(Event::Html(CowStr::from(html)));
                }
                other => events.push(other),
            }
        }

        if let Some(name) = open.pop() {
            return Err(ContentError::UnclosedComponent(name));
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(MdxContent {
            segments: fill_slots(&html_output, slots),
            esm: source.esm,
        })
    }

    /// Highlight a fenced block with syntect. Unknown languages render as
    /// plain text.
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang, highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }

    /// Wrap highlighted code in a table with a line-number gutter
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
            lang,
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MdxRenderer {
    fn default() -> Self {
        Self::new()
    }
}

struct Preprocessed {
    text: String,
    esm: Vec<String>,
}

/// An expression being collected, possibly across lines
struct Expression {
    line: usize,
    depth: usize,
    text: String,
}

/// Strip ESM lines and comment expressions while keeping line numbers
/// stable, and reject unclosed `{`.
fn preprocess(body: &str) -> Result<Preprocessed> {
    let mut text = String::with_capacity(body.len());
    let mut esm = Vec::new();
    let mut fence: Option<&str> = None;
    let mut expr: Option<Expression> = None;

    for (idx, line) in body.lines().enumerate() {
        if expr.is_none() {
            let trimmed = line.trim_start();
            if let Some(marker) = fence {
                if trimmed.starts_with(marker) {
                    fence = None;
                }
                push_code_line(&mut text, line);
                continue;
            }
            if let Some(marker) = ["```", "~~~"].into_iter().find(|m| trimmed.starts_with(m)) {
                fence = Some(marker);
                push_code_line(&mut text, line);
                continue;
            }
            if line.starts_with("import ") || line.starts_with("export ") {
                esm.push(line.to_string());
                text.push('\n');
                continue;
            }
        }

        scan_line(line, idx + 1, &mut expr, &mut text);
        match expr.as_mut() {
            Some(open) => open.text.push('\n'),
            None => text.push('\n'),
        }
    }

    if let Some(open) = expr {
        return Err(ContentError::UnclosedExpression { line: open.line });
    }

    Ok(Preprocessed { text, esm })
}

/// Copy a fenced-code line, dropping characters reserved for slot markers
fn push_code_line(out: &mut String, line: &str) {
    out.extend(line.chars().filter(|c| !matches!(*c, SLOT_OPEN | SLOT_CLOSE)));
    out.push('\n');
}

fn scan_line(line: &str, number: usize, expr: &mut Option<Expression>, out: &mut String) {
    let mut in_code = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        if let Some(open) = expr.as_mut() {
            match c {
                '{' => {
                    open.depth += 1;
                    open.text.push(c);
                }
                '}' => {
                    open.depth -= 1;
                    if open.depth > 0 {
                        open.text.push(c);
                    } else if let Some(done) = expr.take() {
                        finish_expression(done, out);
                    }
                }
                _ => open.text.push(c),
            }
            continue;
        }

        match c {
            '\\' if !in_code => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '`' => {
                in_code = !in_code;
                out.push(c);
            }
            '{' if !in_code => {
                *expr = Some(Expression {
                    line: number,
                    depth: 1,
                    text: String::new(),
                })
            }
            SLOT_OPEN | SLOT_CLOSE => {}
            _ => out.push(c),
        }
    }
}

fn finish_expression(expr: Expression, out: &mut String) {
    let inner = expr.text.trim();
    if inner.starts_with("/*") && inner.ends_with("*/") {
        out.extend(expr.text.chars().filter(|&c| c == '\n'));
    } else {
        out.push('{');
        out.push_str(&expr.text);
        out.push('}');
    }
}

/// Replace component tags in a raw HTML chunk with slot markers
fn extract_components(
    raw: &str,
    line: usize,
    slots: &mut Vec<Segment>,
    open: &mut Vec<String>,
) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut last = 0;

    for caps in COMPONENT_TAG.captures_iter(raw) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        let name = name.as_str().to_string();
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let void = caps.get(4).is_some_and(|m| !m.as_str().is_empty());
        let props = caps.get(3).map(|m| parse_props(m.as_str())).unwrap_or_default();

        let segment = if closing {
            match open.pop() {
                Some(expected) if expected == name => Segment::Close { name },
                Some(expected) => {
                    return Err(ContentError::UnexpectedClosingTag {
                        found: name,
                        expected: format!("`</{}>`", expected),
                        line,
                    })
                }
                None => {
                    return Err(ContentError::UnexpectedClosingTag {
                        found: name,
                        expected: "no closing tag".to_string(),
                        line,
                    })
                }
            }
        } else if void {
            Segment::Void { name, props }
        } else {
            open.push(name.clone());
            Segment::Open { name, props }
        };

        out.push_str(&raw[last..whole.start()]);
        out.push(SLOT_OPEN);
        out.push_str(&slots.len().to_string());
        out.push(SLOT_CLOSE);
        slots.push(segment);
        last = whole.end();
    }

    out.push_str(&raw[last..]);
    Ok(out)
}

fn parse_props(attrs: &str) -> Props {
    ATTRIBUTE
        .captures_iter(attrs)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_string();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "true".to_string());
            Some((name, value))
        })
        .collect()
}

/// Split rendered HTML at slot markers into segments
fn fill_slots(html: &str, slots: Vec<Segment>) -> Vec<Segment> {
    let mut slots: Vec<Option<Segment>> = slots.into_iter().map(Some).collect();
    let mut segments = Vec::new();
    let mut rest = html;

    while let Some(start) = rest.find(SLOT_OPEN) {
        let after = &rest[start + SLOT_OPEN.len_utf8()..];
        let Some(end) = after.find(SLOT_CLOSE) else {
            break;
        };
        let slot = after[..end]
            .parse::<usize>()
            .ok()
            .and_then(|i| slots.get_mut(i))
            .and_then(Option::take);

        if start > 0 {
            segments.push(Segment::Html(rest[..start].to_string()));
        }
        if let Some(slot) = slot {
            segments.push(slot);
        }
        rest = &after[end + SLOT_CLOSE.len_utf8()..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Html(rest.to_string()));
    }
    segments
}

/// 1-based line number of a byte offset
fn line_of(text: &str, offset: usize) -> usize {
    text[..offset.min(text.len())].matches('\n').count() + 1
}

/// Escape text for element content and quoted attribute values
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
