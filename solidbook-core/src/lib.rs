//! `solidbook` Core — shared types
//!
//! This crate provides the page identifiers, route table, markdown content
//! store, site configuration schema and code viewer configuration types
//! shared across `solidbook` (CLI/server) and `solidbook-docs` (rendering).

pub mod config;
pub mod content;
pub mod error;
pub mod page;
pub mod routes;
pub mod viewer;
