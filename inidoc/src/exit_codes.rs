//! Stable exit codes for `inidoc` CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed: unreadable file, parse fault, invalid argument or config.
pub const INVALID: i32 = 1;
/// `inidoc get` found no such section or key.
pub const NOT_FOUND: i32 = 2;
/// `inidoc fmt --check` found a file that is not in canonical form.
pub const UNFORMATTED: i32 = 3;
