//! Version information display
//!
//! Prints version and build metadata in human or JSON format.

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::error::SolidbookError;

/// Print version and build information.
///
/// # Errors
///
/// Returns a JSON error if serialization fails.
pub fn run(args: &VersionArgs) -> Result<(), SolidbookError> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match args.format {
        OutputFormat::Human => println!("{name} {version}"),
        OutputFormat::Json => {
            let info = serde_json::json!({
                "name": name,
                "version": version,
                "rust_version": env!("CARGO_PKG_RUST_VERSION"),
                "routes": solidbook_core::routes::ROUTES.len(),
            });
            println!("{}", serde_json::to_string(&info)?);
        }
    }
    Ok(())
}
