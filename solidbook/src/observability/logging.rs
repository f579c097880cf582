//! Logging initialization.
//!
//! Structured logging via `tracing`, written to stderr so page HTML and JSON
//! printed on stdout stay clean. `SOLIDBOOK_LOG_LEVEL` overrides the
//! verbosity flags with a full `EnvFilter` directive.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{ColorChoice, LogFormat};

/// Environment variable holding an explicit filter directive.
pub const LOG_LEVEL_ENV: &str = "SOLIDBOOK_LOG_LEVEL";

/// Crates whose events `-v` raises. Dependencies such as axum and hyper
/// stay at `warn` until `-vvv`.
const OWN_TARGETS: [&str; 2] = ["solidbook", "solidbook_docs"];

/// Filter directive for a `-v` count.
///
/// Without `-v` only warnings are shown; `-v` and `-vv` raise this
/// workspace's crates to `info` and `debug`; `-vvv` traces everything.
#[must_use]
pub fn verbosity_to_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => return "warn".to_string(),
        1 => "info",
        2 => "debug",
        _ => return "trace".to_string(),
    };
    let mut directives: Vec<String> = OWN_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect();
    directives.push("warn".to_string());
    directives.join(",")
}

/// Whether to emit ANSI colors on stderr.
#[must_use]
pub fn use_ansi(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Auto => {
            std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Initializes the global tracing subscriber.
///
/// If `SOLIDBOOK_LOG_LEVEL` is set it takes precedence over `verbosity`.
/// Uses `try_init()` so calling this more than once (e.g. in tests) is safe.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let show_target = verbosity >= 2;

    match format {
        LogFormat::Human => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(use_ansi(color))
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
