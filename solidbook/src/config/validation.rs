//! Configuration validation
//!
//! Semantic checks on a fully deserialized, overridden `SiteConfig`.
//! Validation collects all issues rather than stopping at the first.

use std::net::SocketAddr;

use solidbook_core::config::schema::SiteConfig;

use crate::error::{Severity, ValidationIssue};

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn error(&mut self, path: &str, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.into(),
            severity: Severity::Error,
        });
    }

    fn warning(&mut self, path: &str, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.into(),
            severity: Severity::Warning,
        });
    }
}

/// Validates a site configuration.
#[must_use]
pub fn validate_site(config: &SiteConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    if config.title.trim().is_empty() {
        result.error("title", "title must not be empty");
    }

    if config.out_dir.as_os_str().is_empty() {
        result.error("out_dir", "output directory must not be empty");
    }

    if let Err(e) = config.server.bind.parse::<SocketAddr>() {
        result.error(
            "server.bind",
            format!("'{}' is not a socket address ({e})", config.server.bind),
        );
    }

    if let Some(dir) = &config.content_dir {
        if !dir.is_dir() {
            result.error(
                "content_dir",
                format!("'{}' is not a directory", dir.display()),
            );
        }
    }

    if config.viewer.template.trim().is_empty() {
        result.error("viewer.template", "viewer template must not be empty");
    }

    if config.viewer.theme.trim().is_empty() {
        result.warning("viewer.theme", "empty theme, the viewer's default is used");
    }

    if let Some(script) = &config.viewer_script {
        if script.trim().is_empty() {
            result.warning("viewer_script", "empty viewer_script is ignored");
        }
    }

    result
}
