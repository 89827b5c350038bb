//! Load/save of documents against the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::classifier::parse_str;
use crate::core::document::IniDocument;
use crate::core::encoding::TextEncoding;
use crate::core::location::resolve_location;
use crate::error::{IniError, Result};

/// Resolves locations against a fixed base directory and moves documents
/// between memory and disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniStore {
    base_dir: PathBuf,
}

impl IniStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Store rooted at the process working directory.
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|err| IniError::io("resolve current directory", ".", err))?;
        Ok(Self::new(cwd))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn resolve(&self, location: &str) -> Result<PathBuf> {
        resolve_location(location, &self.base_dir)
    }

    /// [`IniStore::load_or_create_with`] using the default encoding.
    pub fn load_or_create(&self, location: &str) -> Result<IniDocument> {
        self.load_or_create_with(location, TextEncoding::default())
    }

    /// Load the document at `location`, first creating an empty file if none
    /// exists. An existing file is never rewritten by this call.
    pub fn load_or_create_with(
        &self,
        location: &str,
        encoding: TextEncoding,
    ) -> Result<IniDocument> {
        let path = self.resolve(location)?;
        if !path.exists() {
            info!(path = %path.display(), "creating empty document");
            fs::write(&path, encoding.encode("")?)
                .map_err(|err| IniError::io("create", &path, err))?;
        }
        load_path(&path, encoding)
    }

    /// Write `doc` to `target`, or to its recorded location when `target` is
    /// `None`. Always overwrites. Returns the path written.
    pub fn save(&self, doc: &IniDocument, target: Option<&str>) -> Result<PathBuf> {
        let path = match (target, doc.location()) {
            (Some(target), _) => self.resolve(target)?,
            (None, Some(location)) => location.to_path_buf(),
            (None, None) => {
                return Err(IniError::invalid_location(
                    "<none>",
                    "no target given and document has no recorded location",
                ));
            }
        };
        save_path(&path, doc)?;
        Ok(path)
    }

    /// Like [`IniStore::save`] with an explicit target, then record the
    /// target as the document's location.
    pub fn save_as(&self, doc: &mut IniDocument, target: &str) -> Result<PathBuf> {
        let path = self.save(doc, Some(target))?;
        doc.set_location(Some(path.clone()));
        Ok(path)
    }
}

/// Read and parse the file at `path` with `encoding`, recording both on the
/// returned document.
pub fn load_path(path: &Path, encoding: TextEncoding) -> Result<IniDocument> {
    debug!(path = %path.display(), %encoding, "loading document");
    let bytes = fs::read(path).map_err(|err| IniError::io("read", path, err))?;
    let text = encoding.decode(&bytes)?;
    let mut doc = parse_str(&text)?;
    doc.set_encoding(encoding);
    doc.set_location(Some(path.to_path_buf()));
    debug!(sections = doc.len(), "document loaded");
    Ok(doc)
}

/// Atomically write the canonical rendering of `doc` (temp file + rename).
pub fn save_path(path: &Path, doc: &IniDocument) -> Result<()> {
    debug!(path = %path.display(), encoding = %doc.encoding(), sections = doc.len(), "saving document");
    let bytes = doc.encoding().encode(&doc.to_string())?;
    write_atomic(path, &bytes)
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let file_name = path.file_name().ok_or_else(|| {
        IniError::invalid_location(path.display().to_string(), "path has no file name")
    })?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    fs::write(&tmp_path, contents).map_err(|err| IniError::io("write temp", &tmp_path, err))?;
    fs::rename(&tmp_path, path).map_err(|err| IniError::io("replace", path, err))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::section;

    #[test]
    fn load_or_create_creates_empty_file_once() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = IniStore::new(temp.path());

        let first = store.load_or_create("fresh.ini").expect("first load");
        assert!(first.is_empty());
        let path = temp.path().join("fresh.ini");
        assert_eq!(fs::read(&path).expect("read").len(), 0);
        assert_eq!(first.location(), Some(path.as_path()));

        fs::write(&path, "[kept]\n").expect("seed");
        let second = store.load_or_create("fresh.ini").expect("second load");
        assert!(second.contains("kept"));
    }

    #[test]
    fn load_or_create_twice_on_missing_path_yields_empty_documents() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = IniStore::new(temp.path());
        let a = store.load_or_create("twice.ini").expect("a");
        let b = store.load_or_create("twice.ini").expect("b");
        assert!(a.is_empty() && b.is_empty());
        assert_eq!(a.location(), b.location());
    }

    #[test]
    fn load_or_create_fails_for_missing_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = IniStore::new(temp.path());
        let err = store
            .load_or_create("no/such/dir/a.ini")
            .expect_err("missing parent");
        assert!(matches!(err, IniError::Io { op: "create", .. }));
    }

    #[test]
    fn save_requires_target_or_location() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = IniStore::new(temp.path());
        let err = store.save(&IniDocument::new(), None).expect_err("no location");
        assert!(matches!(err, IniError::InvalidLocation { .. }));
    }

    #[test]
    fn save_overwrites_recorded_location() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = IniStore::new(temp.path());
        fs::write(temp.path().join("app.ini"), "; stale\n[old]\nk=v\n").expect("seed");

        let mut doc = store.load_or_create("app.ini").expect("load");
        doc.remove("old");
        doc.add(section("new", &[("b", "2"), ("a", " 1 ")])).expect("add");
        let written = store.save(&doc, None).expect("save");

        assert_eq!(written, temp.path().join("app.ini"));
        let text = fs::read_to_string(&written).expect("read");
        assert_eq!(text, "[new]\na=1\nb=2\n\n");
        assert!(!temp.path().join("app.ini.tmp").exists());
    }

    #[test]
    fn save_as_records_location() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = IniStore::new(temp.path());
        let mut doc = IniDocument::from_sections([section("a", &[("k", "v")])]).expect("doc");
        store.save_as(&mut doc, "copy.ini").expect("save as");
        assert_eq!(doc.location(), Some(temp.path().join("copy.ini").as_path()));
        let reloaded = store.load_or_create("copy.ini").expect("reload");
        assert_eq!(reloaded, doc);
    }

    #[test]
    fn encoding_is_used_for_both_directions() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = IniStore::new(temp.path());
        let mut doc = IniDocument::from_sections([section("名前", &[("k", "値")])]).expect("doc");
        doc.set_encoding(TextEncoding::Utf16Le);
        store.save_as(&mut doc, "wide.ini").expect("save");

        let bytes = fs::read(temp.path().join("wide.ini")).expect("read");
        assert!(bytes.starts_with(&[0xFF, 0xFE]));

        let reloaded = store
            .load_or_create_with("wide.ini", TextEncoding::Utf16Le)
            .expect("reload");
        assert_eq!(reloaded.encoding(), TextEncoding::Utf16Le);
        assert_eq!(reloaded["名前"]["k"].as_str(), "値");
    }

    #[test]
    fn non_file_locations_are_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = IniStore::new(temp.path());
        let err = store
            .load_or_create("https://example.com/app.ini")
            .expect_err("remote");
        assert!(matches!(err, IniError::InvalidLocation { .. }));
    }
}
