//! The whole configuration: sections ordered by name plus I/O metadata.

use std::collections::BTreeMap;
use std::collections::btree_map::{self, Entry};
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::core::classifier;
use crate::core::encoding::TextEncoding;
use crate::core::section::IniSection;
use crate::error::{IniError, Result};

/// An INI document.
///
/// Section names are unique and case-sensitive; iteration follows name
/// order, never insertion order. The document owns its sections outright:
/// [`IniDocument::add`] moves a section in and [`IniDocument::remove`] hands
/// it back.
///
/// Equality compares sections only; encoding and location are I/O metadata.
#[derive(Debug, Clone, Default)]
pub struct IniDocument {
    sections: BTreeMap<String, IniSection>,
    encoding: TextEncoding,
    location: Option<PathBuf>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from `sections`, failing on the first duplicate name.
    pub fn from_sections<I>(sections: I) -> Result<Self>
    where
        I: IntoIterator<Item = IniSection>,
    {
        let mut doc = Self::new();
        for section in sections {
            doc.add(section)?;
        }
        Ok(doc)
    }

    /// Parse INI text. The result has no location and the default encoding.
    pub fn parse(text: &str) -> Result<Self> {
        classifier::parse_str(text)
    }

    /// Lookup that fails with [`IniError::SectionNotFound`] when `name` is absent.
    pub fn section(&self, name: &str) -> Result<&IniSection> {
        self.sections
            .get(name)
            .ok_or_else(|| IniError::SectionNotFound {
                name: name.to_string(),
            })
    }

    pub fn section_mut(&mut self, name: &str) -> Result<&mut IniSection> {
        self.sections
            .get_mut(name)
            .ok_or_else(|| IniError::SectionNotFound {
                name: name.to_string(),
            })
    }

    pub fn try_get(&self, name: &str) -> Option<&IniSection> {
        self.sections.get(name)
    }

    pub fn try_get_mut(&mut self, name: &str) -> Option<&mut IniSection> {
        self.sections.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Add `section`. If a section with the same name, or a name that
    /// renders as the same header once trimmed, is already present, it is
    /// left unmodified and the call fails with [`IniError::DuplicateSection`].
    pub fn add(&mut self, section: IniSection) -> Result<()> {
        if let Some(existing) = self.header_collision(section.name()) {
            return Err(IniError::DuplicateSection {
                name: existing.clone(),
            });
        }
        self.sections.insert(section.name().to_string(), section);
        Ok(())
    }

    /// Return the section named `name`, creating an empty one if absent.
    pub fn get_or_create(&mut self, name: &str) -> Result<&mut IniSection> {
        if !self.sections.contains_key(name) {
            self.add(IniSection::new(name)?)?;
        }
        self.section_mut(name)
    }

    fn header_collision(&self, name: &str) -> Option<&String> {
        self.sections
            .keys()
            .find(|existing| existing.trim() == name.trim())
    }

    pub fn remove(&mut self, name: &str) -> Option<IniSection> {
        self.sections.remove(name)
    }

    /// Remove the stored section only if it equals `section` (name and
    /// contents).
    pub fn remove_section(&mut self, section: &IniSection) -> bool {
        match self.sections.entry(section.name().to_string()) {
            Entry::Occupied(entry) if entry.get() == section => {
                entry.remove();
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Always `false`: documents are mutable.
    pub fn is_read_only(&self) -> bool {
        false
    }

    /// Total number of key/value pairs across all sections.
    pub fn pair_count(&self) -> usize {
        self.sections.values().map(IniSection::len).sum()
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, IniSection> {
        self.sections.values()
    }

    pub fn names(&self) -> btree_map::Keys<'_, String, IniSection> {
        self.sections.keys()
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn set_encoding(&mut self, encoding: TextEncoding) {
        self.encoding = encoding;
    }

    /// Where the document was loaded from or last saved to.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    pub fn set_location(&mut self, location: Option<PathBuf>) {
        self.location = location;
    }
}

impl PartialEq for IniDocument {
    fn eq(&self, other: &Self) -> bool {
        self.sections == other.sections
    }
}

impl Eq for IniDocument {}

impl FromStr for IniDocument {
    type Err = IniError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text)
    }
}

impl Index<&str> for IniDocument {
    type Output = IniSection;

    /// Panics if `name` is absent; use [`IniDocument::section`] to get an error.
    fn index(&self, name: &str) -> &IniSection {
        match self.sections.get(name) {
            Some(section) => section,
            None => panic!("section '{name}' not found"),
        }
    }
}

impl<'a> IntoIterator for &'a IniDocument {
    type Item = &'a IniSection;
    type IntoIter = btree_map::Values<'a, String, IniSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.values()
    }
}

impl IntoIterator for IniDocument {
    type Item = IniSection;
    type IntoIter = btree_map::IntoValues<String, IniSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.into_values()
    }
}

impl Serialize for IniDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(&self.sections)
    }
}
