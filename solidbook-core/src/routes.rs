//! Static route table and active-route matching.
//!
//! The table is a hand-maintained list of descriptors. [`RouteTree::build`]
//! turns it into a parent/child tree in one pass; nothing is registered at
//! runtime.

use serde::Serialize;

use crate::page::PageKey;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// One entry of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    /// URL path as registered (may carry a trailing slash).
    pub path: &'static str,
    /// Human-readable title shown in navigation.
    pub title: &'static str,
    /// Page whose markdown document this route renders.
    pub page: PageKey,
    /// Path of the parent route, if this is a sub-page.
    pub parent: Option<&'static str>,
}

/// The site's routes, in navigation order.
pub const ROUTES: [RouteDescriptor; 7] = [
    RouteDescriptor {
        path: "/",
        title: "Home",
        page: PageKey::Home,
        parent: None,
    },
    RouteDescriptor {
        path: "/solid/",
        title: "SOLID Principles",
        page: PageKey::Solid,
        parent: None,
    },
    RouteDescriptor {
        path: "/solid/srp",
        title: "Single Responsibility",
        page: PageKey::Srp,
        parent: Some("/solid/"),
    },
    RouteDescriptor {
        path: "/solid/ocp",
        title: "Open Closed",
        page: PageKey::Ocp,
        parent: Some("/solid/"),
    },
    RouteDescriptor {
        path: "/solid/lsp",
        title: "Liskov Substitution",
        page: PageKey::Lsp,
        parent: Some("/solid/"),
    },
    RouteDescriptor {
        path: "/solid/isp",
        title: "Interface Segregation",
        page: PageKey::Isp,
        parent: Some("/solid/"),
    },
    RouteDescriptor {
        path: "/solid/dip",
        title: "Dependency Inversion",
        page: PageKey::Dip,
        parent: Some("/solid/"),
    },
];

impl RouteDescriptor {
    /// The registered path with any trailing slash removed.
    #[must_use]
    pub fn normalized_path(&self) -> &'static str {
        normalize_path(self.path)
    }

    /// Whether this route should be highlighted while `current` is displayed.
    #[must_use]
    pub fn is_active(&self, current: &str) -> bool {
        is_active(self.path, current)
    }
}

/// Strips one trailing slash from any path longer than `/`.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// Active-route rule used by the navigation panel.
///
/// Both paths are normalized first. A route is active when it equals the
/// current path, or when it is not the root and the current path lies
/// beneath it (so `/solid` stays highlighted on `/solid/srp`).
#[must_use]
pub fn is_active(route_path: &str, current: &str) -> bool {
    let route = normalize_path(route_path);
    let current = normalize_path(current);

    if route == current {
        return true;
    }

    route != "/"
        && current
            .strip_prefix(route)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// A route together with its sub-routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteNode {
    /// The route itself.
    #[serde(flatten)]
    pub route: RouteDescriptor,
    /// Sub-routes, in table order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
}

/// Route tree built from a fixed descriptor list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTree {
    /// Top-level routes.
    pub roots: Vec<RouteNode>,
}

impl RouteTree {
    /// Builds the tree for `descriptors` in one expression.
    ///
    /// Descriptors whose parent is missing from the list are dropped.
    #[must_use]
    pub fn build(descriptors: &[RouteDescriptor]) -> Self {
        fn node(route: RouteDescriptor, all: &[RouteDescriptor]) -> RouteNode {
            RouteNode {
                route,
                children: all
                    .iter()
                    .filter(|d| d.parent == Some(route.path))
                    .map(|d| node(*d, all))
                    .collect(),
            }
        }

        Self {
            roots: descriptors
                .iter()
                .filter(|d| d.parent.is_none())
                .map(|d| node(*d, descriptors))
                .collect(),
        }
    }

    /// Tree for the site's [`ROUTES`].
    #[must_use]
    pub fn site() -> Self {
        Self::build(&ROUTES)
    }

    /// Depth-first iteration over all routes with their nesting depth.
    #[must_use]
    pub fn flatten(&self) -> Vec<(usize, &RouteDescriptor)> {
        fn walk<'a>(nodes: &'a [RouteNode], depth: usize, out: &mut Vec<(usize, &'a RouteDescriptor)>) {
            for n in nodes {
                out.push((depth, &n.route));
                walk(&n.children, depth + 1, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.roots, 0, &mut out);
        out
    }
}

/// Finds the route serving `path`, ignoring a trailing slash.
#[must_use]
pub fn resolve(path: &str) -> Option<&'static RouteDescriptor> {
    let wanted = normalize_path(path);
    ROUTES.iter().find(|r| r.normalized_path() == wanted)
}

/// Finds the route rendering `page`.
#[must_use]
pub fn route_for_page(page: PageKey) -> &'static RouteDescriptor {
    // Every PageKey has exactly one entry in ROUTES.
    ROUTES
        .iter()
        .find(|r| r.page == page)
        .unwrap_or(&ROUTES[0])
}

/// Closest known route to an unknown `path`, for "did you mean" hints.
#[must_use]
pub fn suggest(path: &str) -> Option<&'static RouteDescriptor> {
    let wanted = normalize_path(path);
    ROUTES
        .iter()
        .map(|r| (r, strsim::jaro_winkler(wanted, r.normalized_path())))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(r, _)| r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/solid/"), "/solid");
        assert_eq!(normalize_path("/solid/srp"), "/solid/srp");
        assert_eq!(normalize_path(""), "");
    }

    #[test]
    fn test_trailing_slash_is_equivalent() {
        let srp = resolve("/solid/srp").unwrap();
        assert!(srp.is_active("/solid/srp/"));
        assert!(srp.is_active("/solid/srp"));
        assert_eq!(resolve("/solid/srp/"), Some(srp));
    }

    #[test]
    fn test_parent_active_on_child() {
        assert!(is_active("/solid/", "/solid/ocp"));
        assert!(is_active("/solid/", "/solid/"));
        assert!(!is_active("/solid/ocp", "/solid/"));
    }

    #[test]
    fn test_root_only_active_on_root() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/", "/solid/srp"));
    }

    #[test]
    fn test_prefix_respects_segment_boundary() {
        assert!(!is_active("/solid/srp", "/solid/srpx"));
        assert!(!is_active("/solid", "/solidity"));
    }

    #[test]
    fn test_tree_shape() {
        let tree = RouteTree::site();
        assert_eq!(tree.roots.len(), 2);
        assert_eq!(tree.roots[0].route.page, PageKey::Home);
        let solid = &tree.roots[1];
        assert_eq!(solid.route.page, PageKey::Solid);
        let children: Vec<_> = solid.children.iter().map(|c| c.route.page).collect();
        assert_eq!(children, PageKey::PRINCIPLES.to_vec());
    }

    #[test]
    fn test_flatten_preserves_table_order() {
        let tree = RouteTree::site();
        let flat = tree.flatten();
        let pages: Vec<_> = flat.iter().map(|(_, r)| r.page).collect();
        assert_eq!(pages, PageKey::ALL.to_vec());
        assert_eq!(flat[2].0, 1);
    }

    #[test]
    fn test_orphan_descriptor_dropped() {
        let orphan = RouteDescriptor {
            path: "/x/y",
            title: "Orphan",
            page: PageKey::Srp,
            parent: Some("/x/"),
        };
        let tree = RouteTree::build(&[ROUTES[0], orphan]);
        assert_eq!(tree.flatten().len(), 1);
    }

    #[test]
    fn test_every_page_has_a_route() {
        for key in PageKey::ALL {
            assert_eq!(route_for_page(key).page, key);
        }
    }

    #[test]
    fn test_resolve_unknown() {
        assert!(resolve("/solid/kiss").is_none());
    }

    #[test]
    fn test_suggest_close_path() {
        let suggestion = suggest("/solid/srpp").unwrap();
        assert_eq!(suggestion.page, PageKey::Srp);
    }

    #[test]
    fn test_suggest_nothing_for_garbage() {
        assert!(suggest("/zzzzzzzzzzzzzzzzzz/qqqq").is_none());
    }
}
