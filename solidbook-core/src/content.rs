//! Markdown source store.
//!
//! The built-in documents are compiled into the binary. A content directory
//! may replace any of them by providing `<key>.md`; the store is read-only
//! once loaded.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ContentError;
use crate::page::PageKey;

/// Where a document's text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Compiled into the binary.
    Builtin,
    /// Read from an override file.
    File(PathBuf),
}

/// One page's markdown text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownDocument {
    /// Page this document backs.
    pub key: PageKey,
    /// Raw markdown.
    pub source: String,
    /// Provenance, for logging.
    pub origin: Origin,
}

/// Built-in markdown for `key`.
#[must_use]
pub const fn builtin_source(key: PageKey) -> &'static str {
    match key {
        PageKey::Home => include_str!("../content/home.md"),
        PageKey::Solid => include_str!("../content/solid.md"),
        PageKey::Srp => include_str!("../content/srp.md"),
        PageKey::Ocp => include_str!("../content/ocp.md"),
        PageKey::Lsp => include_str!("../content/lsp.md"),
        PageKey::Isp => include_str!("../content/isp.md"),
        PageKey::Dip => include_str!("../content/dip.md"),
    }
}

/// All documents of the site, keyed by page.
#[derive(Debug, Clone)]
pub struct ContentStore {
    documents: BTreeMap<PageKey, MarkdownDocument>,
    skipped: Vec<(String, PathBuf)>,
}

impl ContentStore {
    /// Store holding only the built-in documents.
    #[must_use]
    pub fn builtin() -> Self {
        let documents = PageKey::ALL
            .into_iter()
            .map(|key| {
                (
                    key,
                    MarkdownDocument {
                        key,
                        source: builtin_source(key).to_string(),
                        origin: Origin::Builtin,
                    },
                )
            })
            .collect();

        Self {
            documents,
            skipped: Vec::new(),
        }
    }

    /// Built-in documents, replaced by any `<key>.md` found in `dir`.
    ///
    /// Markdown files whose stem is not a page key are skipped and reported
    /// by [`ContentStore::skipped`]. Other files are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::MissingDirectory`] if `dir` is not a
    /// directory, or [`ContentError::Read`] if a file cannot be read.
    pub fn with_overrides(dir: &Path) -> Result<Self, ContentError> {
        if !dir.is_dir() {
            return Err(ContentError::MissingDirectory {
                path: dir.to_path_buf(),
            });
        }

        let mut store = Self::builtin();
        let entries = fs::read_dir(dir).map_err(|source| ContentError::Read {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
            .collect();
        paths.sort();

        for path in paths {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            let Ok(key) = stem.parse::<PageKey>() else {
                store.skipped.push((stem, path));
                continue;
            };

            let source = fs::read_to_string(&path).map_err(|source| ContentError::Read {
                path: path.clone(),
                source,
            })?;

            store.documents.insert(
                key,
                MarkdownDocument {
                    key,
                    source,
                    origin: Origin::File(path),
                },
            );
        }

        Ok(store)
    }

    /// Document for `key`.
    #[must_use]
    pub fn get(&self, key: PageKey) -> &MarkdownDocument {
        // builtin() seeds every key and overrides only replace entries.
        &self.documents[&key]
    }

    /// Documents in page order.
    pub fn iter(&self) -> impl Iterator<Item = &MarkdownDocument> {
        self.documents.values()
    }

    /// Markdown files in the override directory that named no page.
    #[must_use]
    pub fn skipped(&self) -> &[(String, PathBuf)] {
        &self.skipped
    }
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::builtin()
    }
}
