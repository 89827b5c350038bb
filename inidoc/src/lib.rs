//! In-memory model, parser and serializer for INI configuration files.
//!
//! A document is a flat, two-level store: named sections holding key/value
//! pairs, both kept in sorted order. The crate enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (value cells, sections,
//!   documents, the line classifier, rendering, location resolution).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (reading and writing documents,
//!   tool configuration).
//!
//! [`commands`] coordinates the two to implement the `inidoc` CLI.
//!
//! ```
//! use inidoc::IniDocument;
//!
//! let doc = IniDocument::parse("; settings\n[server]\nport = 8080\n").unwrap();
//! assert_eq!(doc["server"]["port"].to_i64().unwrap(), 8080);
//! assert_eq!(doc.to_string(), "[server]\nport=8080\n\n");
//! ```

pub mod commands;
pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::document::IniDocument;
pub use crate::core::encoding::TextEncoding;
pub use crate::core::section::IniSection;
pub use crate::core::value::IniValue;
pub use crate::error::{IniError, Result};
pub use crate::io::store::IniStore;
