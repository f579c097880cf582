//! `solidbook` rendering: markdown to HTML pages with embedded code viewers.
//!
//! Everything here is synchronous and infallible. Given the same documents,
//! route table and configuration, the output is byte-for-byte identical.

pub mod code_box;
pub mod escape;
pub mod extract;
pub mod markdown;
pub mod nav;
pub mod page;
pub mod validate;

pub use markdown::{RenderedDocument, render_markdown};
pub use page::{RenderedPage, render_not_found, render_page};
