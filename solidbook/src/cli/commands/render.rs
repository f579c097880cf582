//! `render`: print one page.

use solidbook_core::page::PageKey;
use solidbook_core::routes::{RouteDescriptor, resolve, route_for_page, suggest};

use crate::cli::args::{RenderArgs, RenderFormat};
use crate::cli::commands::GlobalOptions;
use crate::config::ConfigOverrides;
use crate::error::SolidbookError;
use crate::site::Site;

/// Render a single page to stdout.
///
/// # Errors
///
/// Returns [`SolidbookError::UnknownRoute`] if the target names no route,
/// or a configuration error if loading fails.
pub fn run(args: &RenderArgs, global: &GlobalOptions) -> Result<(), SolidbookError> {
    let route = find_route(&args.target)?;

    let loaded = global.load_config(ConfigOverrides::default())?;
    let site = Site::load(loaded.config.clone())?;
    let page = site.render(route);

    match args.format {
        RenderFormat::Html => print!("{}", page.html),
        RenderFormat::Json => println!("{}", serde_json::to_string_pretty(&page.code_boxes)?),
    }
    Ok(())
}

/// Resolves a route path (leading `/`) or a page key.
///
/// # Errors
///
/// Returns [`SolidbookError::UnknownRoute`], with the closest match as a
/// suggestion, if nothing matches.
pub fn find_route(target: &str) -> Result<&'static RouteDescriptor, SolidbookError> {
    if target.starts_with('/') {
        return resolve(target).ok_or_else(|| SolidbookError::UnknownRoute {
            path: target.to_string(),
            suggestion: suggest(target).map(|r| r.path.to_string()),
        });
    }

    target
        .parse::<PageKey>()
        .map(route_for_page)
        .map_err(|_| SolidbookError::UnknownRoute {
            path: target.to_string(),
            suggestion: PageKey::suggest(target).map(|k| k.as_str().to_string()),
        })
}
