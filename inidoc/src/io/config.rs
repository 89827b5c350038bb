//! Tool configuration stored in `inidoc.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::core::encoding::TextEncoding;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "inidoc.toml";

/// Settings for the `inidoc` binary.
///
/// Missing fields default; command-line flags take precedence over the file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Encoding used to read and write documents.
    pub encoding: TextEncoding,

    /// Directory relative document locations resolve against. Relative values
    /// are taken relative to the config file's directory.
    pub base_dir: Option<PathBuf>,
}

impl ToolConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(base_dir) = &self.base_dir {
            if base_dir.as_os_str().is_empty() {
                return Err(anyhow!("base_dir must not be empty"));
            }
        }
        Ok(())
    }

    /// Directory relative locations resolve against, falling back to `cwd`.
    pub fn resolve_base_dir(&self, cwd: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ToolConfig::default()`. A relative
/// `base_dir` is anchored to the file's parent directory.
pub fn load_config(path: &Path) -> Result<ToolConfig> {
    if !path.exists() {
        return Ok(ToolConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut cfg: ToolConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    if let (Some(dir), Some(parent)) = (&cfg.base_dir, path.parent()) {
        cfg.base_dir = Some(parent.join(dir));
    }
    Ok(cfg)
}
