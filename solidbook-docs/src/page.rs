//! Full HTML page assembly.
//!
//! A page is the navigation panel plus the rendered markdown of the route's
//! document, wrapped in a fixed layout.

use solidbook_core::config::schema::SiteConfig;
use solidbook_core::content::MarkdownDocument;
use solidbook_core::routes::{RouteDescriptor, RouteTree};
use solidbook_core::viewer::ViewerConfiguration;

use crate::escape::escape_html;
use crate::markdown::render_markdown;
use crate::nav::render_nav;

/// Stylesheet served at [`STYLESHEET_PATH`].
pub const STYLESHEET: &str = include_str!("../assets/style.css");

/// URL path of the stylesheet.
pub const STYLESHEET_PATH: &str = "/style.css";

/// A rendered page and what went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Route the page is served at.
    pub route: RouteDescriptor,
    /// Document title (first H1), falling back to the route title.
    pub title: String,
    /// Complete HTML document.
    pub html: String,
    /// Viewer configurations of the page's code boxes.
    pub code_boxes: Vec<ViewerConfiguration>,
}

/// Renders the page for `route` from `document`.
#[must_use]
pub fn render_page(
    route: &RouteDescriptor,
    document: &MarkdownDocument,
    tree: &RouteTree,
    config: &SiteConfig,
) -> RenderedPage {
    let rendered = render_markdown(&document.source, &config.viewer);
    let title = rendered
        .title
        .clone()
        .unwrap_or_else(|| route.title.to_string());

    let mut sections = Vec::new();
    sections.push("<div class=\"markdown\">".to_string());
    sections.push(rendered.html);
    sections.push("</div>".to_string());

    let html = layout(
        config,
        &title,
        &render_nav(tree, &config.title, route.path),
        &sections.join("\n"),
        !rendered.code_boxes.is_empty(),
    );

    RenderedPage {
        route: *route,
        title,
        html,
        code_boxes: rendered.code_boxes,
    }
}

/// Renders the page shown for an unknown path.
#[must_use]
pub fn render_not_found(
    path: &str,
    suggestion: Option<&RouteDescriptor>,
    tree: &RouteTree,
    config: &SiteConfig,
) -> String {
    let mut sections = Vec::new();
    sections.push("<div class=\"markdown not-found\">".to_string());
    sections.push("<h1>Page not found</h1>".to_string());
    sections.push(format!(
        "<p>No page lives at <code>{}</code>.</p>",
        escape_html(path)
    ));
    if let Some(route) = suggestion {
        sections.push(format!(
            "<p class=\"suggestion\">Did you mean <a href=\"{}\">{}</a>?</p>",
            escape_html(route.path),
            escape_html(route.title)
        ));
    }
    sections.push("</div>".to_string());

    layout(
        config,
        "Page not found",
        &render_nav(tree, &config.title, path),
        &sections.join("\n"),
        false,
    )
}

fn layout(config: &SiteConfig, title: &str, nav: &str, body: &str, has_code_boxes: bool) -> String {
    let mut lines = Vec::new();

    lines.push("<!DOCTYPE html>".to_string());
    lines.push("<html lang=\"en\">".to_string());
    lines.push("<head>".to_string());
    lines.push("<meta charset=\"utf-8\">".to_string());
    lines.push(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">".to_string(),
    );
    lines.push(format!(
        "<title>{} · {}</title>",
        escape_html(title),
        escape_html(&config.title)
    ));
    if !config.description.is_empty() {
        lines.push(format!(
            "<meta name=\"description\" content=\"{}\">",
            escape_html(&config.description)
        ));
    }
    lines.push(format!("<link rel=\"stylesheet\" href=\"{STYLESHEET_PATH}\">"));
    lines.push("</head>".to_string());
    lines.push("<body>".to_string());
    lines.push("<div class=\"layout\">".to_string());
    lines.push(nav.to_string());
    lines.push("<main>".to_string());
    lines.push(body.to_string());
    lines.push("</main>".to_string());
    lines.push("</div>".to_string());

    // Pages without code boxes have nothing to mount.
    if has_code_boxes {
        if let Some(script) = &config.viewer_script {
            lines.push(format!(
                "<script type=\"module\" src=\"{}\"></script>",
                escape_html(script)
            ));
        }
    }

    lines.push("</body>".to_string());
    lines.push("</html>".to_string());
    lines.push(String::new());

    lines.join("\n")
}
