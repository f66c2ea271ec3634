use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use super::{KeyValueStore, StoreError};

/// Entries kept as a flat JSON object in a single file.
///
/// The file is re-read on every access so external edits are picked up; a
/// missing file is an empty store.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let data = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Entries to rewrite on the next write. A malformed file counts as empty
    /// and is overwritten.
    fn entries_for_write(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match self.load_entries() {
            Err(err @ StoreError::Malformed { .. }) => {
                log::warn!("Discarding unreadable store contents: {err}");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn save_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let data = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, data).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.save_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries_for_write()?;
        entries.remove(key);
        self.save_entries(&entries)
    }
}
