//! Canonical text rendering.

use std::fmt::{self, Write};

use crate::core::document::IniDocument;
use crate::core::section::IniSection;

/// Write `section` as a header, one `key=value` line per pair, then a blank
/// line. Name, keys and values are trimmed.
pub fn write_section<W: Write>(out: &mut W, section: &IniSection) -> fmt::Result {
    writeln!(out, "[{}]", section.name().trim())?;
    for (key, value) in section {
        writeln!(out, "{}={}", key.trim(), value.trimmed())?;
    }
    writeln!(out)
}

/// Write every section of `doc` in name order.
pub fn write_document<W: Write>(out: &mut W, doc: &IniDocument) -> fmt::Result {
    for section in doc {
        write_section(out, section)?;
    }
    Ok(())
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_document(f, self)
    }
}

impl fmt::Display for IniSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_section(f, self)
    }
}
