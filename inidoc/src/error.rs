//! Typed faults raised by the document model, the line classifier and the
//! load/save layer.

use std::path::PathBuf;

use thiserror::Error;

/// Library result alias.
pub type Result<T, E = IniError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum IniError {
    /// A required argument is empty or cannot be represented in the format.
    #[error("invalid {what}: {reason}")]
    InvalidArgument { what: &'static str, reason: String },

    /// The location is not a file, or no location is available for saving.
    #[error("invalid location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },

    #[error("section '{name}' already exists")]
    DuplicateSection { name: String },

    #[error("key '{key}' already exists in section '{section}'")]
    DuplicateKey { section: String, key: String },

    #[error("line {line}: section '{name}' already exists")]
    DuplicateSectionAt { name: String, line: usize },

    #[error("line {line}: key '{key}' already exists in section '{section}'")]
    DuplicateKeyAt {
        section: String,
        key: String,
        line: usize,
    },

    #[error("section '{name}' not found")]
    SectionNotFound { name: String },

    #[error("key '{key}' not found in section '{section}'")]
    KeyNotFound { section: String, key: String },

    /// A `key=value` line appeared before any `[section]` header.
    #[error("line {line}: key-value pair outside of any section")]
    UnanchoredKeyValue { line: usize },

    #[error("value '{raw}' is not a valid {target}")]
    InvalidValue { raw: String, target: &'static str },

    #[error("decode {encoding}: {reason}")]
    Decode {
        encoding: &'static str,
        reason: String,
    },

    #[error("encode {encoding}: {reason}")]
    Encode {
        encoding: &'static str,
        reason: String,
    },

    #[error("{op} {}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IniError {
    pub(crate) fn invalid_argument(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            what,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_location(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLocation {
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// True for the "absent key" faults raised by indexed lookups.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SectionNotFound { .. } | Self::KeyNotFound { .. }
        )
    }
}
