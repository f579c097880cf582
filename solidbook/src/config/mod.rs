//! Configuration module
//!
//! Loads `solidbook.yaml` into a frozen [`SiteConfig`], applying
//! environment substitution, command-line overrides and validation.

pub mod loader;
pub mod validation;

pub use loader::{
    ConfigLoader, ConfigOverrides, DEFAULT_CONFIG_FILE, LoadResult, LoadWarning, LoaderOptions,
};
pub use solidbook_core::config::schema::{ServerSettings, SiteConfig};
pub use validation::{ValidationResult, validate_site};
