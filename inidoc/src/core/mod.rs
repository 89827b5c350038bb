//! Pure document model, grammar and rendering.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod classifier;
pub mod document;
pub mod encoding;
pub mod location;
pub mod render;
pub mod section;
pub mod value;
