//! `solidbook` - static site generator and preview server
//!
//! Renders the SOLID principles book to static HTML (`build`) or serves it
//! for previewing (`serve`). Rendering itself lives in `solidbook-docs`;
//! this crate adds configuration, output, the HTTP server and the CLI.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod server;
pub mod site;
