//! Site configuration.

pub mod schema;
