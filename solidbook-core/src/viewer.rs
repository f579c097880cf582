//! Typed configuration for the embeddable code viewer (Sandpack).
//!
//! The viewer reads this structure, serialized as JSON, from each code box
//! on a page. Field names follow the viewer's camelCase prop names.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Entry-point file the viewer's `react` template always creates.
///
/// It has nothing to do with the displayed snippet, so every configuration
/// carries an override hiding it.
pub const ENTRY_POINT: &str = "/App.js";

/// Per-file descriptor understood by the viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    /// Open this file's tab initially. Default: first visible file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// File contents. Absent for pure overrides such as the hidden entry point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Disallow editing. Default: `false` (editable).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    /// Keep the file in the virtual project but never show a tab for it.
    /// Default: `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl FileDescriptor {
    /// Descriptor for a displayed, read-only snippet.
    #[must_use]
    pub fn read_only_snippet(code: impl Into<String>) -> Self {
        Self {
            active: Some(true),
            code: Some(code.into()),
            read_only: Some(true),
            hidden: None,
        }
    }

    /// Override that hides a file without supplying contents.
    #[must_use]
    pub const fn hidden() -> Self {
        Self {
            active: None,
            code: None,
            read_only: None,
            hidden: Some(true),
        }
    }
}

/// Editor pane options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorOptions {
    /// Show a tab strip above the editor. Computed per code box; a
    /// configured value is always replaced.
    #[serde(default)]
    pub show_tabs: bool,

    /// Number each line in the gutter. Default: `true`.
    #[serde(default = "default_true")]
    pub show_line_numbers: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            show_tabs: false,
            show_line_numbers: true,
        }
    }
}

/// Layout and theme options passed through to the viewer unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    /// Project template the viewer boots. Default: `"react"`.
    pub template: String,

    /// Named colour theme. Default: `"amethyst"`.
    pub theme: String,

    /// CSS classes appended to the viewer's internal elements, keyed by the
    /// viewer's element names (`sp-wrapper`, `sp-editor`, ...). Default:
    /// rounded wrapper, auto-height editor.
    pub classes: IndexMap<String, String>,

    /// Show line numbers in the editor. Default: `true`.
    pub show_line_numbers: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        let mut classes = IndexMap::new();
        classes.insert(
            "sp-wrapper".to_string(),
            "!rounded-2xl !overflow-hidden".to_string(),
        );
        classes.insert("sp-editor".to_string(), "!h-auto".to_string());
        Self {
            template: "react".to_string(),
            theme: "amethyst".to_string(),
            classes,
            show_line_numbers: true,
        }
    }
}

/// `options` block of the viewer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOptions {
    /// See [`ViewerOptions::classes`].
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub classes: IndexMap<String, String>,
}

/// Everything the viewer needs to display one code box.
///
/// Invariant: `files` always contains [`ENTRY_POINT`] mapped to a hidden
/// descriptor. `solidbook_docs::code_box` is the only constructor in the
/// workspace and enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfiguration {
    /// Project template.
    pub template: String,
    /// Colour theme.
    pub theme: String,
    /// Virtual files, in insertion order.
    pub files: IndexMap<String, FileDescriptor>,
    /// Provider-level options.
    pub options: ProviderOptions,
    /// Editor pane options.
    pub editor: EditorOptions,
}

impl ViewerConfiguration {
    /// The displayed file: the first entry that is not the entry point.
    #[must_use]
    pub fn primary_file(&self) -> Option<(&str, &FileDescriptor)> {
        self.files
            .iter()
            .find(|(path, _)| path.as_str() != ENTRY_POINT)
            .map(|(path, file)| (path.as_str(), file))
    }
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snippet_descriptor_shape() {
        let value = serde_json::to_value(FileDescriptor::read_only_snippet("const x = 1;")).unwrap();
        assert_eq!(
            value,
            json!({ "active": true, "code": "const x = 1;", "readOnly": true })
        );
    }

    #[test]
    fn test_hidden_descriptor_shape() {
        let value = serde_json::to_value(FileDescriptor::hidden()).unwrap();
        assert_eq!(value, json!({ "hidden": true }));
    }

    #[test]
    fn test_viewer_options_defaults() {
        let options = ViewerOptions::default();
        assert_eq!(options.template, "react");
        assert_eq!(options.theme, "amethyst");
        assert!(options.show_line_numbers);
        assert_eq!(options.classes["sp-editor"], "!h-auto");
    }

    #[test]
    fn test_viewer_options_partial_deserialize() {
        let options: ViewerOptions = serde_json::from_value(json!({ "theme": "dracula" })).unwrap();
        assert_eq!(options.theme, "dracula");
        assert_eq!(options.template, "react");
        assert!(options.show_line_numbers);
    }

    #[test]
    fn test_primary_file_skips_entry_point() {
        let mut files = IndexMap::new();
        files.insert(ENTRY_POINT.to_string(), FileDescriptor::hidden());
        files.insert("Card.tsx".to_string(), FileDescriptor::read_only_snippet("x"));
        let config = ViewerConfiguration {
            template: "react".to_string(),
            theme: "amethyst".to_string(),
            files,
            options: ProviderOptions::default(),
            editor: EditorOptions::default(),
        };
        let (path, file) = config.primary_file().unwrap();
        assert_eq!(path, "Card.tsx");
        assert_eq!(file.code.as_deref(), Some("x"));
    }
}
