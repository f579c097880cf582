//! Markdown-to-HTML rendering with code boxes.
//!
//! Parsing and HTML generation are delegated to `pulldown-cmark`. The only
//! customization is for fenced code carrying a language tag: those become a
//! code box (viewer configuration plus a read-only `<pre>` fallback). Every
//! other node, including untagged fences and inline code, goes through the
//! default writer untouched.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;
use solidbook_core::viewer::{ViewerConfiguration, ViewerOptions};
use tracing::warn;

use crate::code_box;
use crate::escape::{escape_html, escape_json_for_script};
use crate::extract::{ExtractedCodeBlock, extract_code_block};

static LANGUAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"language-(\w+)").expect("valid regex"));

/// Output of rendering one markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// HTML fragment for the document body.
    pub html: String,
    /// Text of the first level-1 heading, if any.
    pub title: Option<String>,
    /// Viewer configurations, in document order.
    pub code_boxes: Vec<ViewerConfiguration>,
}

/// Class attribute the HTML writer gives a fence with this info string.
///
/// The language is the info string's first space-separated word; an empty
/// info string yields no class.
#[must_use]
pub fn class_for_info(info: &str) -> Option<String> {
    let lang = info.split(' ').next().unwrap_or_default();
    if lang.is_empty() {
        None
    } else {
        Some(format!("language-{lang}"))
    }
}

/// Extracts the language word from a `language-<word>` class attribute.
#[must_use]
pub fn language_from_class(class: &str) -> Option<&str> {
    LANGUAGE_RE
        .captures(class)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Renders `source` to HTML, turning language-tagged fences into code boxes.
///
/// Rendering is a pure function of its inputs and cannot fail.
#[must_use]
pub fn render_markdown(source: &str, options: &ViewerOptions) -> RenderedDocument {
    let mut parser = Parser::new_ext(source, parser_options());
    let mut events: Vec<Event<'_>> = Vec::new();
    let mut code_boxes = Vec::new();
    let mut title = TitleTracker::default();

    while let Some(event) = parser.next() {
        title.observe(&event);

        let Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) = event else {
            events.push(event);
            continue;
        };

        let body = collect_code(&mut parser);
        let class = class_for_info(&info);

        if let Some(language) = class.as_deref().and_then(language_from_class) {
            let mut block = extract_code_block(&body);
            strip_final_newline(&mut block.code);
            let config = code_box::from_block(&block, options);
            let html = code_box_html(code_boxes.len(), language, &block, &config);
            events.push(Event::Html(CowStr::from(html)));
            code_boxes.push(config);
        } else {
            events.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))));
            if !body.is_empty() {
                events.push(Event::Text(CowStr::from(body)));
            }
            events.push(Event::End(TagEnd::CodeBlock));
        }
    }

    let mut html = String::with_capacity(source.len() * 2);
    pulldown_cmark::html::push_html(&mut html, events.into_iter());

    RenderedDocument {
        html,
        title: title.finish(),
        code_boxes,
    }
}

/// Markdown extensions enabled for every document, when rendering and linting.
pub(crate) fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Consumes events up to the end of the current code block, returning its text.
fn collect_code(parser: &mut Parser<'_>) -> String {
    let mut body = String::new();
    for event in parser.by_ref() {
        match event {
            Event::End(TagEnd::CodeBlock) => break,
            Event::Text(text) => body.push_str(&text),
            _ => {}
        }
    }
    body
}

/// A fence's text always ends with the newline before the closing fence.
///
/// Stripped after extraction so a fence holding only a marker still has
/// the blank line the marker needs.
fn strip_final_newline(code: &mut String) {
    if code.ends_with('\n') {
        code.pop();
    }
}

/// HTML for one code box.
///
/// The JSON configuration is what the viewer script mounts; the `<pre>` is
/// the visible fallback until (or unless) it does.
fn code_box_html(
    index: usize,
    language: &str,
    block: &ExtractedCodeBlock,
    config: &ViewerConfiguration,
) -> String {
    let mut parts = Vec::new();

    parts.push(format!(
        "<figure class=\"code-box\" id=\"code-box-{index}\" data-language=\"{}\">",
        escape_html(language)
    ));

    if !block.file_name.is_empty() {
        parts.push(format!(
            "<figcaption class=\"code-box-tab\">{}</figcaption>",
            escape_html(&block.file_name)
        ));
    }

    match serde_json::to_string(config) {
        Ok(json) => parts.push(format!(
            "<script type=\"application/json\" class=\"code-box-config\">{}</script>",
            escape_json_for_script(&json)
        )),
        Err(e) => warn!(index, error = %e, "viewer configuration not serializable, showing fallback only"),
    }

    parts.push(format!(
        "<pre class=\"code-box-fallback\"><code class=\"language-{}\">{}</code></pre>",
        escape_html(language),
        escape_html(&block.code)
    ));
    parts.push("</figure>\n".to_string());

    parts.join("\n")
}

/// Captures the text of the first level-1 heading.
#[derive(Debug, Default)]
struct TitleTracker {
    buffer: Option<String>,
    title: Option<String>,
}

impl TitleTracker {
    fn observe(&mut self, event: &Event<'_>) {
        if self.title.is_some() {
            return;
        }
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => self.buffer = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(buffer) = self.buffer.as_mut() {
                    buffer.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                self.title = self.buffer.take().map(|t| t.trim().to_string());
            }
            _ => {}
        }
    }

    fn finish(self) -> Option<String> {
        self.title.filter(|t| !t.is_empty())
    }
}
