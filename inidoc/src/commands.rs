//! Orchestration for `inidoc` CLI commands.
//!
//! Each command resolves its file through an [`IniStore`], runs the pure
//! core logic, and reports a structured outcome that `main` maps to output
//! and exit codes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::core::document::IniDocument;
use crate::core::encoding::TextEncoding;
use crate::core::value::IniValue;
use crate::io::config::ToolConfig;
use crate::io::store::{IniStore, load_path, save_path};

/// Resolved settings shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub store: IniStore,
    pub encoding: TextEncoding,
}

impl CommandContext {
    pub fn new(store: IniStore, encoding: TextEncoding) -> Self {
        Self { store, encoding }
    }

    /// Combine tool config with an optional `--encoding` override.
    pub fn from_config(cfg: &ToolConfig, cwd: &Path, encoding: Option<TextEncoding>) -> Self {
        Self {
            store: IniStore::new(cfg.resolve_base_dir(cwd)),
            encoding: encoding.unwrap_or(cfg.encoding),
        }
    }

    /// Load a document that must already exist.
    fn load_existing(&self, file: &str) -> Result<IniDocument> {
        let path = self.store.resolve(file)?;
        if !path.is_file() {
            bail!("no such file {}", path.display());
        }
        load_path(&path, self.encoding).with_context(|| format!("load {}", path.display()))
    }
}

/// Counts reported by `inidoc check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckReport {
    pub sections: usize,
    pub pairs: usize,
}

pub fn check(ctx: &CommandContext, file: &str) -> Result<CheckReport> {
    let doc = ctx.load_existing(file)?;
    Ok(CheckReport {
        sections: doc.len(),
        pairs: doc.pair_count(),
    })
}

/// Canonical text, or a `{section: {key: value}}` JSON object.
pub fn show(ctx: &CommandContext, file: &str, json: bool) -> Result<String> {
    let doc = ctx.load_existing(file)?;
    if json {
        let mut out = serde_json::to_string_pretty(&doc).context("serialize json")?;
        out.push('\n');
        return Ok(out);
    }
    Ok(doc.to_string())
}

/// Trimmed value of `section.key`, or `None` if either is absent.
pub fn get(ctx: &CommandContext, file: &str, section: &str, key: &str) -> Result<Option<String>> {
    let doc = ctx.load_existing(file)?;
    let value = doc
        .try_get(section)
        .and_then(|s| s.get(key))
        .map(|v| v.trimmed().to_string());
    debug!(section, key, found = value.is_some(), "lookup");
    Ok(value)
}

/// Upsert `section.key = value`, creating the file and section as needed.
pub fn set(
    ctx: &CommandContext,
    file: &str,
    section: &str,
    key: &str,
    value: &str,
) -> Result<PathBuf> {
    let mut doc = ctx.store.load_or_create_with(file, ctx.encoding)?;
    let value = IniValue::new(value)?;
    doc.get_or_create(section)?.set(key, value)?;
    let path = ctx.store.save(&doc, None)?;
    info!(path = %path.display(), section, key, "value set");
    Ok(path)
}

/// Remove `section.key`, or the whole section when `key` is `None`.
/// Returns whether anything was removed; the file is only rewritten if so.
pub fn unset(ctx: &CommandContext, file: &str, section: &str, key: Option<&str>) -> Result<bool> {
    let mut doc = ctx.load_existing(file)?;
    let removed = match key {
        Some(key) => doc
            .try_get_mut(section)
            .and_then(|s| s.remove(key))
            .is_some(),
        None => doc.remove(section).is_some(),
    };
    if removed {
        ctx.store.save(&doc, None)?;
    }
    Ok(removed)
}

/// Result of `inidoc fmt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FmtOutcome {
    /// File already canonical.
    Unchanged,
    /// File rewritten in canonical form.
    Rewritten,
    /// `--check`: file is not canonical and was left untouched.
    Unformatted,
}

pub fn fmt(ctx: &CommandContext, file: &str, check_only: bool) -> Result<FmtOutcome> {
    let doc = ctx.load_existing(file)?;
    let path = doc
        .location()
        .map(Path::to_path_buf)
        .context("loaded document has no location")?;
    let current = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    let canonical = ctx.encoding.encode(&doc.to_string())?;
    if current == canonical {
        return Ok(FmtOutcome::Unchanged);
    }
    if check_only {
        return Ok(FmtOutcome::Unformatted);
    }
    save_path(&path, &doc)?;
    info!(path = %path.display(), "formatted");
    Ok(FmtOutcome::Rewritten)
}
