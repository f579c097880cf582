//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod build;
pub mod completions;
pub mod render;
pub mod routes;
pub mod serve;
pub mod version;

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use crate::cli::args::{Cli, Commands};
use crate::config::{ConfigLoader, ConfigOverrides, LoadResult, LoaderOptions};
use crate::error::SolidbookError;

/// Global options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// `--config`
    pub config: Option<PathBuf>,
    /// `--content-dir`
    pub content_dir: Option<PathBuf>,
    /// `--quiet`
    pub quiet: bool,
}

impl GlobalOptions {
    /// Loads the effective configuration, applying `overrides` on top of the
    /// global `--content-dir`.
    ///
    /// Loader warnings are logged.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if loading or validation fails.
    pub fn load_config(&self, mut overrides: ConfigOverrides) -> Result<LoadResult, SolidbookError> {
        if overrides.content_dir.is_none() {
            overrides.content_dir.clone_from(&self.content_dir);
        }

        let loader = ConfigLoader::new(LoaderOptions {
            overrides,
            ..LoaderOptions::default()
        });
        let result = loader.resolve(self.config.as_deref())?;

        match &result.source {
            Some(path) => tracing::info!(config = %path.display(), "loaded configuration"),
            None => tracing::debug!("no configuration file, using defaults"),
        }
        for warning in &result.warnings {
            tracing::warn!(
                location = warning.location.as_deref().unwrap_or("<unknown>"),
                "{}",
                warning.message
            );
        }

        Ok(result)
    }
}

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// `cancel` fires on the first Ctrl+C / SIGTERM; only `serve` waits on it.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub async fn dispatch(cli: Cli, cancel: CancellationToken) -> Result<(), SolidbookError> {
    let global = GlobalOptions {
        config: cli.config,
        content_dir: cli.content_dir,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Build(args) => build::run(&args, &global),
        Commands::Serve(args) => serve::run(&args, &global, cancel).await,
        Commands::Routes(args) => routes::run(&args),
        Commands::Render(args) => render::run(&args, &global),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => version::run(&args),
    }
}
