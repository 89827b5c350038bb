//! Named group of key/value pairs.

use std::collections::BTreeMap;
use std::collections::btree_map::{self, Entry};
use std::ops::Index;

use serde::{Serialize, Serializer};

use crate::core::value::IniValue;
use crate::error::{IniError, Result};

/// One `[name]` block.
///
/// Keys are unique and iterate in ascending byte order. Two sections are
/// equal when their names and their full key/value contents are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSection {
    name: String,
    entries: BTreeMap<String, IniValue>,
}

impl IniSection {
    /// Create an empty section. Names with leading or trailing whitespace are
    /// rejected because rendering trims them.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().len() != name.len() {
            return Err(IniError::invalid_argument(
                "section name",
                format!("{name:?} must not have surrounding whitespace"),
            ));
        }
        Self::from_header(name)
    }

    /// Section for a name captured from a `[name]` header, kept verbatim.
    pub(crate) fn from_header(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_section_name(&name)?;
        Ok(Self {
            name,
            entries: BTreeMap::new(),
        })
    }

    /// Create a section pre-populated with `pairs`. Duplicate keys are rejected.
    pub fn with_pairs<I, K, V>(name: impl Into<String>, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut section = Self::new(name)?;
        for (key, value) in pairs {
            section.insert(key, IniValue::new(value)?)?;
        }
        Ok(section)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&IniValue> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut IniValue> {
        self.entries.get_mut(key)
    }

    /// Lookup that fails with [`IniError::KeyNotFound`] when `key` is absent.
    pub fn value(&self, key: &str) -> Result<&IniValue> {
        self.entries.get(key).ok_or_else(|| IniError::KeyNotFound {
            section: self.name.clone(),
            key: key.to_string(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Add a new pair. Fails if `key` is already present; the existing value
    /// is left untouched. Keys are stored trimmed.
    pub fn insert(&mut self, key: impl Into<String>, value: IniValue) -> Result<()> {
        let key = normalize_key(key.into())?;
        validate_pair_line(&key, &value)?;
        match self.entries.entry(key) {
            Entry::Occupied(entry) => Err(IniError::DuplicateKey {
                section: self.name.clone(),
                key: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
        }
    }

    /// Insert or replace a pair, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: IniValue) -> Result<Option<IniValue>> {
        let key = normalize_key(key.into())?;
        validate_pair_line(&key, &value)?;
        Ok(self.entries.insert(key, value))
    }

    pub fn remove(&mut self, key: &str) -> Option<IniValue> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, IniValue> {
        self.entries.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, IniValue> {
        self.entries.keys()
    }
}

impl Index<&str> for IniSection {
    type Output = IniValue;

    /// Panics if `key` is absent; use [`IniSection::value`] to get an error.
    fn index(&self, key: &str) -> &IniValue {
        match self.entries.get(key) {
            Some(value) => value,
            None => panic!("key '{}' not found in section '{}'", key, self.name),
        }
    }
}

impl<'a> IntoIterator for &'a IniSection {
    type Item = (&'a String, &'a IniValue);
    type IntoIter = btree_map::Iter<'a, String, IniValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for IniSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(&self.entries)
    }
}

/// Section names must survive a render/parse cycle as a header line.
fn validate_section_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        "must not be empty"
    } else if name.contains(['\r', '\n']) {
        "must not contain a line break"
    } else if name.contains(']') {
        "must not contain ']'"
    } else {
        return Ok(());
    };
    Err(IniError::invalid_argument(
        "section name",
        format!("{name:?} {reason}"),
    ))
}

fn normalize_key(key: String) -> Result<String> {
    validate_key(&key)?;
    if key.trim().len() == key.len() {
        Ok(key)
    } else {
        Ok(key.trim().to_string())
    }
}

/// Keys must survive a render/parse cycle as the left side of `key=value`.
fn validate_key(key: &str) -> Result<()> {
    let trimmed = key.trim();
    let reason = if trimmed.is_empty() {
        "must not be empty"
    } else if key.contains(['\r', '\n']) {
        "must not contain a line break"
    } else if key.contains('=') {
        "must not contain '='"
    } else if trimmed.starts_with('[') && trimmed.contains(']') {
        "must not read as a '[section]' header"
    } else if trimmed.starts_with(';') {
        "must not start with ';'"
    } else {
        return Ok(());
    };
    Err(IniError::invalid_argument("key", format!("{key:?} {reason}")))
}

/// `[k=v]` is read back as a header, so a `[`-led key cannot take a value
/// holding `]`.
fn validate_pair_line(key: &str, value: &IniValue) -> Result<()> {
    if key.starts_with('[') && value.trimmed().contains(']') {
        return Err(IniError::invalid_argument(
            "value",
            format!("{:?} for key {key:?} would read as a '[section]' header", value.as_str()),
        ));
    }
    Ok(())
}
