//! File-backed persisted tier.
//!
//! The whole key space is one JSON object on disk. It is read once when the
//! backend is opened and rewritten after every mutation, so a crash loses at
//! most the write in flight. Two processes sharing a file race with
//! last-write-wins semantics. A mutation whose flush fails is undone in
//! memory so the map never drifts from the file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use mengya_types::error::Result;

use crate::storage::Storage;

/// Persisted tier stored as a JSON object file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open (or lazily create) the backing file at `path`.
    ///
    /// A missing file starts empty. A file that is not a JSON object of
    /// strings is logged and also starts empty; it is overwritten on the
    /// next write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let items = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<BTreeMap<String, String>>(&text) {
                Ok(items) => items,
                Err(e) => {
                    log::warn!(
                        "Ignoring corrupted storage file {}: {e}",
                        path.display()
                    );
                    BTreeMap::new()
                },
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("Opened {} with {} keys", path.display(), items.len());
        Ok(Self { path, items })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&self.items)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let previous = self.items.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // Roll back so memory matches what is on disk.
            match previous {
                Some(old) => self.items.insert(key.to_string(), old),
                None => self.items.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        if let Some(old) = self.items.remove(key)
            && let Err(e) = self.flush()
        {
            self.items.insert(key.to_string(), old);
            return Err(e);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.items.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let s = FileStorage::open(dir.path().join("store.json")).unwrap();
        assert!(s.keys().unwrap().is_empty());
    }

    #[test]
    fn writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        {
            let mut s = FileStorage::open(&path).unwrap();
            s.set_item("mengya_child.profile", "{\"level\":2}").unwrap();
            s.set_item("mengya_temp", "1").unwrap();
            s.remove_item("mengya_temp").unwrap();
        }
        let s = FileStorage::open(&path).unwrap();
        assert_eq!(
            s.get_item("mengya_child.profile").unwrap().as_deref(),
            Some("{\"level\":2}")
        );
        assert_eq!(s.get_item("mengya_temp").unwrap(), None);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/store.json");
        let mut s = FileStorage::open(&path).unwrap();
        s.set_item("k", "v").unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn failed_remove_keeps_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        let mut s = FileStorage::open(sub.join("store.json")).unwrap();
        s.set_item("k", "v").unwrap();

        // A plain file where the directory was makes every flush fail.
        fs::remove_dir_all(&sub).unwrap();
        fs::write(&sub, "not a directory").unwrap();

        assert!(s.remove_item("k").is_err());
        assert_eq!(s.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(s.keys().unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn failed_set_keeps_the_old_value() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        let mut s = FileStorage::open(sub.join("store.json")).unwrap();
        s.set_item("k", "v").unwrap();

        fs::remove_dir_all(&sub).unwrap();
        fs::write(&sub, "not a directory").unwrap();

        assert!(s.set_item("k", "w").is_err());
        assert!(s.set_item("other", "x").is_err());
        assert_eq!(s.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(s.get_item("other").unwrap(), None);
    }

    #[test]
    fn corrupted_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{ this is not json").unwrap();
        let mut s = FileStorage::open(&path).unwrap();
        assert!(s.keys().unwrap().is_empty());

        s.set_item("k", "v").unwrap();
        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
