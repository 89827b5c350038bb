//! Filesystem-facing helpers: document load/save and tool configuration.

pub mod config;
pub mod store;
