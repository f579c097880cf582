//! Configuration schema types
//!
//! This module defines the site configuration deserialized from
//! `solidbook.yaml`. Every field has a default, so an empty file (or no file
//! at all) yields a working configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::viewer::ViewerOptions;

// ============================================================================
// Top-Level Configuration
// ============================================================================

/// Root configuration for a `solidbook` site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "snake_case")]
pub struct SiteConfig {
    /// Site title, shown in the navigation header and every `<title>`.
    pub title: String,

    /// Short description placed in the `<meta name="description">` tag.
    pub description: String,

    /// Directory `build` writes to.
    pub out_dir: PathBuf,

    /// Optional directory of `<key>.md` files overriding the built-in documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_dir: Option<PathBuf>,

    /// URL of the script that mounts the code viewer on each code box.
    ///
    /// When unset, pages show the read-only `<pre>` fallback only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer_script: Option<String>,

    /// Options passed through to the code viewer.
    pub viewer: ViewerOptions,

    /// Preview server settings.
    pub server: ServerSettings,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "SOLID Principles".to_string(),
            description: "The SOLID design principles, explained with bad and good examples."
                .to_string(),
            out_dir: PathBuf::from("dist"),
            content_dir: None,
            viewer_script: None,
            viewer: ViewerOptions::default(),
            server: ServerSettings::default(),
        }
    }
}

// ============================================================================
// Server Settings
// ============================================================================

/// Preview server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "snake_case")]
pub struct ServerSettings {
    /// Address to bind, e.g. `"127.0.0.1:4000"`.
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:4000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        let config: SiteConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let yaml = r"
title: Design Notes
content_dir: ./docs
viewer:
  theme: dracula
server:
  bind: 0.0.0.0:8080
";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Design Notes");
        assert_eq!(config.content_dir, Some(PathBuf::from("./docs")));
        assert_eq!(config.viewer.theme, "dracula");
        assert_eq!(config.viewer.template, "react");
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.out_dir, PathBuf::from("dist"));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = serde_yaml::from_str::<SiteConfig>("flavor: spicy\n").unwrap_err();
        assert!(err.to_string().contains("flavor"));

        let err = serde_yaml::from_str::<SiteConfig>("server:\n  port: 80\n").unwrap_err();
        assert!(err.to_string().contains("port"));
    }
}
