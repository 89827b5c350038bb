//! Test-only helpers for constructing documents and on-disk fixtures.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::core::document::IniDocument;
use crate::core::section::IniSection;
use crate::io::store::IniStore;

/// Create a section from literal pairs. Panics on invalid input.
pub fn section(name: &str, pairs: &[(&str, &str)]) -> IniSection {
    IniSection::with_pairs(name, pairs.iter().copied()).expect("valid section")
}

/// Create a document from `(name, pairs)` literals. Panics on invalid input.
pub fn document(sections: &[(&str, &[(&str, &str)])]) -> IniDocument {
    IniDocument::from_sections(sections.iter().map(|(name, pairs)| section(name, pairs)))
        .expect("valid document")
}

/// Temporary directory with an [`IniStore`] rooted in it.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn store(&self) -> IniStore {
        IniStore::new(self.dir.path())
    }

    /// Write `contents` to `name` inside the directory, returning its path.
    pub fn write(&self, name: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn read(&self, name: &str) -> std::io::Result<String> {
        fs::read_to_string(self.dir.path().join(name))
    }
}
