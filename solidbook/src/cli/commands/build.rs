//! `build`: render the site to a directory.

use std::sync::Arc;

use crate::cli::args::BuildArgs;
use crate::cli::commands::GlobalOptions;
use crate::config::ConfigOverrides;
use crate::error::{Severity, SiteError, SolidbookError};
use crate::site::{Site, write_site};

/// Execute `build`.
///
/// With `--strict`, error-severity lint issues (including override files
/// that name no page) fail the build before anything is written.
///
/// # Errors
///
/// Returns an error if configuration or content loading fails, if strict
/// lint fails, or if the output cannot be written.
pub fn run(args: &BuildArgs, global: &GlobalOptions) -> Result<(), SolidbookError> {
    let loaded = global.load_config(ConfigOverrides {
        out_dir: args.out.clone(),
        ..ConfigOverrides::default()
    })?;
    let config = Arc::clone(&loaded.config);
    let site = Site::load(Arc::clone(&config))?;

    let issues = site.lint();
    for issue in &issues {
        match issue.severity {
            Severity::Error => tracing::error!(path = %issue.path, "{}", issue.message),
            Severity::Warning => tracing::warn!(path = %issue.path, "{}", issue.message),
        }
    }
    if args.strict {
        let errors: Vec<_> = issues
            .into_iter()
            .filter(|i| i.severity == Severity::Error)
            .collect();
        if !errors.is_empty() {
            return Err(SiteError::Lint { issues: errors }.into());
        }
    }

    let pages = if args.only.is_empty() {
        site.render_all()
    } else {
        site.render_only(&args.only)
    };

    let report = write_site(&pages, &config, &config.out_dir)?;
    let code_boxes: usize = report.manifest.routes.iter().map(|r| r.code_boxes).sum();
    tracing::info!(
        pages = pages.len(),
        code_boxes,
        out = %report.out_dir.display(),
        "build finished"
    );

    if !global.quiet {
        eprintln!(
            "Built {} pages ({code_boxes} code boxes) into {}",
            pages.len(),
            report.out_dir.display()
        );
    }

    Ok(())
}
