use std::cell::{RefCell, RefMut};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{KeyValueStore, StoreConfig, StoreError};

/// Durable store kept as a single JSON object (`{ "key": "value", ... }`).
///
/// The document is read on first access and cached. Every write rewrites the
/// whole document through a sibling temp file and a rename, so a crash never
/// leaves a half-written file behind.
pub struct FileStore {
    path: PathBuf,
    cache: RefCell<Option<BTreeMap<String, String>>>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RefCell::new(None),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::open(config.path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drop the cached document; the next access re-reads the file.
    pub fn reload(&self) {
        *self.cache.borrow_mut() = None;
    }

    fn entries(&self) -> Result<RefMut<'_, BTreeMap<String, String>>, StoreError> {
        let mut cache = self.cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(self.read_document()?);
        }
        Ok(RefMut::map(cache, |c| c.get_or_insert_with(BTreeMap::new)))
    }

    fn read_document(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_document(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!(
            "FileStore: wrote {} entries to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries()?;
        let previous = entries.insert(key.to_owned(), value.to_owned());
        if let Err(e) = self.write_document(&entries) {
            // keep the cache in step with what is on disk
            match previous {
                Some(prev) => entries.insert(key.to_owned(), prev),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries()?;
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.write_document(&entries) {
            entries.insert(key.to_owned(), previous);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileStore::open(&path);
        store.set("count", "41").unwrap();
        store.set("name", "\"Ada\"").unwrap();
        drop(store);

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("count").unwrap().as_deref(), Some("41"));
        assert_eq!(reopened.get("name").unwrap().as_deref(), Some("\"Ada\""));
        assert_eq!(reopened.get("missing").unwrap(), None);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("absent.json"));
        assert_eq!(store.get("anything").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_document_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::open(&path);
        assert!(matches!(store.get("k"), Err(StoreError::Corrupt(_))));
        // writes refuse to clobber a document they could not read
        assert!(matches!(store.set("k", "1"), Err(StoreError::Corrupt(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn remove_rewrites_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let store = FileStore::open(&path);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();

        store.reload();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn failed_write_leaves_cache_untouched() {
        let dir = tempfile::tempdir().unwrap();
        // parent is a regular file, so create_dir_all fails
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let store = FileStore::open(blocker.join("storage.json"));
        assert!(matches!(store.set("k", "1"), Err(StoreError::Io(_))));
        assert_eq!(store.get("k").unwrap(), None);
    }
}
