//! Resolution of caller-supplied locations to file paths.
//!
//! Callers may pass an absolute path, a relative path, or a `file:` URI.
//! Relative paths resolve against an explicit base directory instead of
//! process state so resolution stays deterministic.

use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{IniError, Result};

/// Resolve `raw` to a file path.
///
/// - `file:` URIs on the local host become the percent-decoded path
/// - any other absolute-form URI (`scheme://...`) is rejected with
///   [`IniError::InvalidLocation`]
/// - absolute paths are returned unchanged
/// - relative paths have `\` normalized to `/` and leading separators
///   stripped, then are joined onto `base_dir`
pub fn resolve_location(raw: &str, base_dir: &Path) -> Result<PathBuf> {
    if raw.trim().is_empty() {
        return Err(IniError::invalid_argument("location", "must not be empty"));
    }
    if is_absolute_uri(raw) {
        return file_uri_path(raw);
    }

    let path = Path::new(raw);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let normalized = raw.replace('\\', "/");
    let mut resolved = base_dir.to_path_buf();
    for part in normalized.split('/').filter(|part| !part.is_empty()) {
        resolved.push(part);
    }
    Ok(resolved)
}

/// `file:...` or `scheme://...`. A colon alone does not make a URI, so
/// `ab:c.ini` and `C:\dir` stay paths.
fn is_absolute_uri(raw: &str) -> bool {
    if raw
        .get(.."file:".len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("file:"))
    {
        return true;
    }
    let Some((scheme, _)) = raw.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    scheme.len() >= 2
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn file_uri_path(raw: &str) -> Result<PathBuf> {
    // `Url` keeps malformed escapes such as `%zz` literally.
    if !has_valid_escapes(raw) {
        return Err(IniError::invalid_location(raw, "invalid percent-encoding"));
    }
    let url = Url::parse(raw).map_err(|err| IniError::invalid_location(raw, err.to_string()))?;
    match url.scheme() {
        "file" => url
            .to_file_path()
            .map_err(|()| IniError::invalid_location(raw, "not a local file path")),
        other => Err(IniError::invalid_location(
            raw,
            format!("'{other}' is not a file scheme"),
        )),
    }
}

/// Every `%` must start a two-digit hex escape.
fn has_valid_escapes(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|(_, byte)| **byte == b'%')
        .all(|(idx, _)| {
            bytes
                .get(idx + 1..idx + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
        })
}
