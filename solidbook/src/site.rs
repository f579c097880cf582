//! Site assembly and static output.
//!
//! [`Site`] ties the frozen configuration, the content store and the route
//! tree together. `build` writes its pages to disk; `serve` keeps them in
//! memory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use solidbook_core::config::schema::SiteConfig;
use solidbook_core::content::{ContentStore, Origin};
use solidbook_core::page::PageKey;
use solidbook_core::routes::{ROUTES, RouteDescriptor, RouteTree, suggest};
use solidbook_docs::page::{RenderedPage, STYLESHEET, render_not_found, render_page};
use solidbook_docs::validate::lint_document;
use tracing::{debug, info, warn};

use crate::error::{ContentError, SiteError, ValidationIssue};
use crate::observability::metrics::record_page_rendered;

/// Name of the manifest written next to the pages.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Everything needed to render the site.
#[derive(Debug, Clone)]
pub struct Site {
    config: Arc<SiteConfig>,
    store: ContentStore,
    tree: RouteTree,
}

impl Site {
    /// Loads documents for `config`, applying its content directory if set.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the content directory cannot be read.
    pub fn load(config: Arc<SiteConfig>) -> Result<Self, ContentError> {
        let store = match &config.content_dir {
            Some(dir) => {
                let store = ContentStore::with_overrides(dir)?;
                for (key, path) in store.skipped() {
                    warn!(key = %key, path = %path.display(), "override file names no page, skipped");
                }
                store
            }
            None => ContentStore::builtin(),
        };

        for document in store.iter() {
            if let Origin::File(path) = &document.origin {
                info!(page = %document.key, path = %path.display(), "using override document");
            }
        }

        Ok(Self::new(config, store))
    }

    /// Site from an already loaded store.
    #[must_use]
    pub fn new(config: Arc<SiteConfig>, store: ContentStore) -> Self {
        Self {
            config,
            store,
            tree: RouteTree::site(),
        }
    }

    /// The frozen configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// The loaded documents.
    #[must_use]
    pub const fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Renders the page for `route`.
    #[must_use]
    pub fn render(&self, route: &RouteDescriptor) -> RenderedPage {
        let page = render_page(route, self.store.get(route.page), &self.tree, &self.config);
        record_page_rendered(route.page.as_str(), page.code_boxes.len());
        debug!(path = route.path, code_boxes = page.code_boxes.len(), "rendered page");
        page
    }

    /// Renders every route in table order.
    #[must_use]
    pub fn render_all(&self) -> Vec<RenderedPage> {
        ROUTES.iter().map(|route| self.render(route)).collect()
    }

    /// Renders the routes for `pages` only, in table order.
    #[must_use]
    pub fn render_only(&self, pages: &[PageKey]) -> Vec<RenderedPage> {
        ROUTES
            .iter()
            .filter(|route| pages.contains(&route.page))
            .map(|route| self.render(route))
            .collect()
    }

    /// The 404 page for `path`.
    #[must_use]
    pub fn not_found(&self, path: &str) -> String {
        render_not_found(path, suggest(path), &self.tree, &self.config)
    }

    /// Lint issues across all documents, plus unknown override files.
    #[must_use]
    pub fn lint(&self) -> Vec<ValidationIssue> {
        let mut issues: Vec<ValidationIssue> = self.store.iter().flat_map(lint_document).collect();

        issues.extend(self.store.skipped().iter().map(|(key, path)| ValidationIssue {
            path: path.display().to_string(),
            message: format!("unknown page key '{key}'"),
            severity: crate::error::Severity::Error,
        }));

        issues
    }
}

// ============================================================================
// Static Output
// ============================================================================

/// One route's entry in `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// Route path.
    pub path: String,
    /// Page title.
    pub title: String,
    /// Page key.
    pub page: PageKey,
    /// Output file, relative to the output directory.
    pub file: String,
    /// Number of code boxes on the page.
    pub code_boxes: usize,
}

/// Contents of `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// Generator name and version.
    pub generator: String,
    /// When the build ran.
    pub generated_at: DateTime<Utc>,
    /// Site title.
    pub title: String,
    /// Pages written.
    pub routes: Vec<ManifestEntry>,
}

/// Summary of a finished build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Output directory.
    pub out_dir: PathBuf,
    /// The manifest that was written.
    pub manifest: Manifest,
}

/// File a route is written to, relative to the output directory.
///
/// `/` → `index.html`, `/solid/` → `solid/index.html`,
/// `/solid/srp` → `solid/srp/index.html`.
#[must_use]
pub fn output_file(route_path: &str) -> PathBuf {
    route_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<PathBuf>()
        .join("index.html")
}

/// Writes `pages`, the stylesheet and the manifest under `out_dir`.
///
/// # Errors
///
/// Returns [`SiteError`] if a directory cannot be created or a file cannot
/// be written.
pub fn write_site(
    pages: &[RenderedPage],
    config: &SiteConfig,
    out_dir: &Path,
) -> Result<BuildReport, SiteError> {
    create_dir(out_dir)?;

    let mut routes = Vec::with_capacity(pages.len());
    for page in pages {
        let relative = output_file(page.route.path);
        let target = out_dir.join(&relative);
        if let Some(parent) = target.parent() {
            create_dir(parent)?;
        }
        write_file(&target, page.html.as_bytes())?;
        info!(path = page.route.path, file = %target.display(), "wrote page");

        routes.push(ManifestEntry {
            path: page.route.path.to_string(),
            title: page.title.clone(),
            page: page.route.page,
            file: relative.to_string_lossy().replace('\\', "/"),
            code_boxes: page.code_boxes.len(),
        });
    }

    write_file(&out_dir.join("style.css"), STYLESHEET.as_bytes())?;

    let manifest = Manifest {
        generator: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        generated_at: Utc::now(),
        title: config.title.clone(),
        routes,
    };
    let json = serde_json::to_vec_pretty(&manifest).map_err(|e| SiteError::Write {
        path: out_dir.join(MANIFEST_FILE),
        source: std::io::Error::other(e),
    })?;
    write_file(&out_dir.join(MANIFEST_FILE), &json)?;

    Ok(BuildReport {
        out_dir: out_dir.to_path_buf(),
        manifest,
    })
}

fn create_dir(path: &Path) -> Result<(), SiteError> {
    fs::create_dir_all(path).map_err(|source| SiteError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), SiteError> {
    fs::write(path, contents).map_err(|source| SiteError::Write {
        path: path.to_path_buf(),
        source,
    })
}
