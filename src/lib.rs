//! Translatr: a single-page translation form backed by a LibreTranslate endpoint.
//!
//! Expose modules for integration tests and binaries.

pub mod catalog;
pub mod config;
pub mod form;
pub mod render;
pub mod server;
pub mod translation;
