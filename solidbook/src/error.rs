//! Error types for `solidbook`
//!
//! Every fallible command returns [`SolidbookError`]; `main` prints it and
//! exits with [`SolidbookError::exit_code`].

use std::net::AddrParseError;
use std::path::PathBuf;
use thiserror::Error;

pub use solidbook_core::error::{ConfigError, ContentError, Severity, ValidationIssue};

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `solidbook` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error (including failed strict lint)
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure, bad content dir)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Preview server error (bind failure, metrics exporter)
    pub const SERVER_ERROR: i32 = 4;

    /// Path or page key names no route
    pub const UNKNOWN_ROUTE: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `solidbook` operations.
#[derive(Debug, Error)]
pub enum SolidbookError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Content override directory error
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Static site output error
    #[error(transparent)]
    Site(#[from] SiteError),

    /// Preview server error
    #[error(transparent)]
    Server(#[from] ServerError),

    /// `render` was given a path or key that matches no route
    #[error("no route for '{path}'{}", suggestion.as_ref().map_or_else(String::new, |s| format!(" (did you mean '{s}'?)")))]
    UnknownRoute {
        /// What the user asked for
        path: String,
        /// Closest known route path, if any
        suggestion: Option<String>,
    },

    /// Command line could not be parsed; holds clap's rendered message
    #[error("{0}")]
    Usage(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<clap::Error> for SolidbookError {
    fn from(err: clap::Error) -> Self {
        Self::Usage(err.render().to_string())
    }
}

impl SolidbookError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Json(_) => ExitCode::ERROR,
            Self::Content(ContentError::Read { .. }) => ExitCode::IO_ERROR,
            Self::Content(_) => ExitCode::CONFIG_ERROR,
            Self::Site(SiteError::Lint { .. }) => ExitCode::ERROR,
            Self::Site(_) => ExitCode::IO_ERROR,
            Self::Server(_) => ExitCode::SERVER_ERROR,
            Self::UnknownRoute { .. } => ExitCode::UNKNOWN_ROUTE,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
        }
    }
}

// ============================================================================
// Site Errors
// ============================================================================

/// Errors raised while writing the static site.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Creating an output directory failed
    #[error("failed to create {path}: {source}")]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing an output file failed
    #[error("failed to write {path}: {source}")]
    Write {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// `--strict` found error-severity lint issues
    #[error("{} document issue(s): {}", issues.len(), issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Lint {
        /// Issues that failed the build
        issues: Vec<ValidationIssue>,
    },
}

// ============================================================================
// Server Errors
// ============================================================================

/// Preview server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The bind address does not parse
    #[error("invalid bind address '{addr}': {source}")]
    InvalidAddress {
        /// Address as given
        addr: String,
        /// Parse failure
        #[source]
        source: AddrParseError,
    },

    /// Binding the listener failed
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that could not be bound
        addr: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The server loop failed
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// Installing the metrics exporter failed
    #[error("metrics exporter: {0}")]
    Metrics(String),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `solidbook` operations.
pub type Result<T> = std::result::Result<T, SolidbookError>;

// ============================================================================
// Tests
// ============================================================================
