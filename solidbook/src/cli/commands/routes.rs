//! `routes`: print the route table.

use solidbook_core::routes::{ROUTES, RouteTree};

use crate::cli::args::{OutputFormat, RoutesArgs};
use crate::error::SolidbookError;

/// Print the route table.
///
/// # Errors
///
/// Returns a JSON error if serialization fails.
pub fn run(args: &RoutesArgs) -> Result<(), SolidbookError> {
    match args.format {
        OutputFormat::Human => print!("{}", format_human(&RouteTree::site())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ROUTES)?),
    }
    Ok(())
}

/// One line per route, sub-routes indented under their parent.
#[must_use]
pub fn format_human(tree: &RouteTree) -> String {
    tree.flatten()
        .into_iter()
        .map(|(depth, route)| {
            let path = format!("{}{}", "  ".repeat(depth), route.path);
            format!("{path:<16} {:<24} {}\n", route.title, route.page)
        })
        .collect()
}
