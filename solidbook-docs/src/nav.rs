//! Side navigation panel.
//!
//! Renders the route tree as nested lists. The entry (or entries) matching
//! the current path get the `active` class; a parent stays active while one
//! of its sub-pages is shown.

use solidbook_core::routes::{RouteNode, RouteTree, normalize_path};

use crate::escape::escape_html;

/// Renders the navigation panel for the page at `current_path`.
#[must_use]
pub fn render_nav(tree: &RouteTree, site_title: &str, current_path: &str) -> String {
    let mut lines = Vec::new();

    lines.push("<nav class=\"side-nav\" aria-label=\"Main\">".to_string());
    lines.push(format!(
        "<a class=\"site-title\" href=\"/\">{}</a>",
        escape_html(site_title)
    ));
    render_list(&tree.roots, current_path, false, &mut lines);
    lines.push("</nav>".to_string());

    lines.join("\n")
}

fn render_list(nodes: &[RouteNode], current: &str, nested: bool, lines: &mut Vec<String>) {
    if nodes.is_empty() {
        return;
    }

    lines.push(if nested {
        "<ul class=\"nav-sub\">".to_string()
    } else {
        "<ul class=\"nav-list\">".to_string()
    });

    for node in nodes {
        let route = &node.route;
        let active = route.is_active(current);
        let exact = normalize_path(route.path) == normalize_path(current);

        let mut classes = vec!["nav-link"];
        if nested {
            classes.push("nav-link-sub");
        }
        if active {
            classes.push("active");
        }

        lines.push("<li>".to_string());
        lines.push(format!(
            "<a class=\"{}\" href=\"{}\"{}>{}</a>",
            classes.join(" "),
            escape_html(route.path),
            if exact { " aria-current=\"page\"" } else { "" },
            escape_html(route.title)
        ));
        render_list(&node.children, current, true, lines);
        lines.push("</li>".to_string());
    }

    lines.push("</ul>".to_string());
}
