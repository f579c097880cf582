//! Lint checks for markdown documents.
//!
//! Rendering never fails, so authoring mistakes (a marker missing its blank
//! line, a labelled fence without a language) would otherwise go unnoticed.
//! `build --strict` turns error-severity issues into a failed build.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use solidbook_core::content::MarkdownDocument;
use solidbook_core::error::{Severity, ValidationIssue};

use crate::extract::has_marker;
use crate::markdown::{class_for_info, language_from_class, parser_options};

/// Checks one document.
///
/// Returns every issue found; an empty list means the document is clean.
#[must_use]
pub fn lint_document(document: &MarkdownDocument) -> Vec<ValidationIssue> {
    let source = document.source.as_str();
    let file = format!("{}.md", document.key);
    let mut issues = Vec::new();

    let mut headings = 0usize;
    let mut has_h1 = false;
    let mut fence: Option<(Option<String>, usize, String)> = None;

    for (event, range) in Parser::new_ext(source, parser_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                headings += 1;
                has_h1 |= level == pulldown_cmark::HeadingLevel::H1;
            }
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                let language = class_for_info(&info)
                    .as_deref()
                    .and_then(language_from_class)
                    .map(str::to_string);
                fence = Some((language, line_of(source, range.start), String::new()));
            }
            Event::Text(text) => {
                if let Some((_, _, body)) = fence.as_mut() {
                    body.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((language, line, body)) = fence.take() {
                    check_fence(&file, line, language.as_deref(), &body, &mut issues);
                }
            }
            _ => {}
        }
    }

    if headings == 0 {
        issues.push(ValidationIssue {
            path: file,
            message: "document has no headings".to_string(),
            severity: Severity::Error,
        });
    } else if !has_h1 {
        issues.push(ValidationIssue {
            path: file,
            message: "no level-1 heading; the route title is used instead".to_string(),
            severity: Severity::Warning,
        });
    }

    issues
}

/// Returns `true` if any issue is an error.
#[must_use]
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

fn check_fence(
    file: &str,
    line: usize,
    language: Option<&str>,
    body: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let labelled = has_marker(body);

    if language.is_none() {
        if labelled {
            issues.push(ValidationIssue {
                path: format!("{file}:{line}"),
                message: "filename marker in a fence without a language is shown verbatim"
                    .to_string(),
                severity: Severity::Warning,
            });
        }
        return;
    }

    if !labelled && looks_like_marker(body) {
        issues.push(ValidationIssue {
            path: format!("{file}:{line}"),
            message: "fence opens like a filename marker but is not followed by exactly one blank line"
                .to_string(),
            severity: Severity::Warning,
        });
    }
}

/// First line has the `[[ ... ]]` shape.
fn looks_like_marker(body: &str) -> bool {
    let first = body.lines().next().unwrap_or_default().trim_end();
    first.starts_with("[[") && first.ends_with("]]")
}

/// 1-based line number of byte `offset`.
fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}
