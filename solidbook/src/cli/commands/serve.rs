//! `serve`: run the preview server.

use tokio_util::sync::CancellationToken;

use crate::cli::args::ServeArgs;
use crate::cli::commands::GlobalOptions;
use crate::config::ConfigOverrides;
use crate::error::SolidbookError;
use crate::server::PreviewServer;
use crate::site::Site;

/// Start the preview server and serve until `cancel` fires.
///
/// # Errors
///
/// Returns a configuration error if loading fails, or a server error if the
/// metrics exporter or listener cannot be set up.
pub async fn run(
    args: &ServeArgs,
    global: &GlobalOptions,
    cancel: CancellationToken,
) -> Result<(), SolidbookError> {
    if let Some(port) = args.metrics_port {
        crate::observability::init_metrics(Some(port))?;
        tracing::info!(port, "Prometheus metrics endpoint started");
    }

    let loaded = global.load_config(ConfigOverrides {
        bind: args.bind.clone(),
        ..ConfigOverrides::default()
    })?;
    let site = Site::load(loaded.config.clone())?;

    let server = PreviewServer::bind(site, &loaded.config.server.bind).await?;
    if !global.quiet {
        eprintln!("Serving on http://{}/ (Ctrl+C to stop)", server.local_addr());
    }

    server.run(cancel).await?;
    Ok(())
}
