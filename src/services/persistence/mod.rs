//! Persistence of the countdown event (name + end date).
//!
//! The event is kept as two string entries in a key-value backend, mirroring
//! browser local storage. `EventStore` is the adapter the countdown engine
//! talks to; it never surfaces backend failures, it logs them and degrades to
//! "nothing stored".

mod json_file;
mod memory;
mod sqlite;

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use thiserror::Error;

use crate::models::event::PersistedRecord;
use crate::models::settings::{StorageBackend, StorageSettings};
use crate::services::database::Database;
use crate::utils::date::parse_end_instant;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub const EVENT_NAME_KEY: &str = "eventName";
pub const END_DATE_KEY: &str = "endDate";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed store file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value storage backend.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Load/save/clear of the persisted event over any `KeyValueStore`.
pub struct EventStore {
    backend: Box<dyn KeyValueStore>,
}

impl EventStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Returns only the fields that are present and valid.
    pub fn load(&self) -> PersistedRecord {
        let event_name = self.read(EVENT_NAME_KEY).filter(|name| !name.is_empty());
        let end_date = self.read(END_DATE_KEY).filter(|value| {
            let valid = parse_end_instant(value).is_some();
            if !valid {
                log::warn!("Ignoring malformed stored end date {:?}", value);
            }
            valid
        });

        PersistedRecord {
            event_name,
            end_date,
        }
    }

    /// Stores both fields; an empty value removes its entry instead.
    pub fn save(&mut self, event_name: &str, end_date: &str) {
        self.write(EVENT_NAME_KEY, event_name);
        self.write(END_DATE_KEY, end_date);
    }

    pub fn save_record(&mut self, record: &PersistedRecord) {
        self.save(
            record.event_name.as_deref().unwrap_or_default(),
            record.end_date.as_deref().unwrap_or_default(),
        );
    }

    pub fn clear(&mut self) {
        self.write(EVENT_NAME_KEY, "");
        self.write(END_DATE_KEY, "");
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Failed to read {key} from storage: {err}");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        let result = if value.is_empty() {
            self.backend.remove(key)
        } else {
            self.backend.set(key, value)
        };

        if let Err(err) = result {
            log::warn!("Failed to persist {key}: {err}");
        }
    }
}

/// Opens the backend selected in settings.
pub fn open_event_store(settings: &StorageSettings) -> Result<EventStore> {
    match settings.backend {
        StorageBackend::Memory => {
            log::info!("Using in-memory event storage; nothing will survive a restart");
            Ok(EventStore::in_memory())
        }
        StorageBackend::Json => {
            let path = resolve_storage_path(settings, "countdown.json")?;
            log::info!("Using JSON event storage at {}", path.display());
            Ok(EventStore::new(JsonFileStore::new(path)))
        }
        StorageBackend::Sqlite => {
            let path = resolve_storage_path(settings, "countdown.db")?;
            log::info!("Using SQLite event storage at {}", path.display());
            let db = Database::new(&path.to_string_lossy())?;
            db.initialize_schema()?;
            Ok(EventStore::new(SqliteStore::new(db)))
        }
    }
}

fn resolve_storage_path(settings: &StorageSettings, file_name: &str) -> Result<PathBuf> {
    if let Some(path) = &settings.path {
        return Ok(path.clone());
    }

    if let Some(dirs) = ProjectDirs::from("com", "CountdownWidget", "CountdownWidget") {
        let dir = dirs.data_dir();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create dir {}", dir.display()))?;
        Ok(dir.join(file_name))
    } else {
        log::warn!("Unable to resolve project directory; using current dir for {file_name}");
        Ok(PathBuf::from(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_then_load_round_trips() {
        let mut store = EventStore::in_memory();
        store.save("Wedding", "2031-05-17");

        assert_eq!(
            store.load(),
            PersistedRecord {
                event_name: Some("Wedding".to_string()),
                end_date: Some("2031-05-17".to_string()),
            }
        );
    }

    #[test]
    fn test_empty_field_removes_entry() {
        let backend = MemoryStore::new();
        let mut store = EventStore::new(backend.clone());
        store.save("Wedding", "2031-05-17");
        store.save("Wedding", "");

        assert_eq!(backend.get(END_DATE_KEY).unwrap(), None);
        assert_eq!(backend.get(EVENT_NAME_KEY).unwrap().as_deref(), Some("Wedding"));
    }

    #[test]
    fn test_clear_removes_both_entries() {
        let mut store = EventStore::in_memory();
        store.save("Wedding", "2031-05-17");
        store.clear();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_malformed_end_date_loads_as_absent() {
        let mut backend = MemoryStore::new();
        backend.set(EVENT_NAME_KEY, "Wedding").unwrap();
        backend.set(END_DATE_KEY, "2031-02-30").unwrap();

        let record = EventStore::new(backend).load();
        assert_eq!(record.event_name.as_deref(), Some("Wedding"));
        assert_eq!(record.end_date, None);
    }

    #[test]
    fn test_read_failure_degrades_to_empty_record() {
        let mut backend = MockKeyValueStore::new();
        backend.expect_get().returning(|_| {
            Err(StoreError::Io {
                path: PathBuf::from("countdown.json"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        });

        assert!(EventStore::new(backend).load().is_empty());
    }

    #[test]
    fn test_save_routes_empty_values_to_remove() {
        let mut backend = MockKeyValueStore::new();
        backend
            .expect_set()
            .with(eq(EVENT_NAME_KEY), eq("Launch"))
            .times(1)
            .returning(|_, _| Ok(()));
        backend
            .expect_remove()
            .with(eq(END_DATE_KEY))
            .times(1)
            .returning(|_| Ok(()));

        EventStore::new(backend).save("Launch", "");
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut backend = MockKeyValueStore::new();
        backend
            .expect_set()
            .returning(|_, _| Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery)));

        EventStore::new(backend).save("Launch", "2030-01-01");
    }

    #[test]
    fn test_memory_backend_selected_from_settings() {
        let settings = StorageSettings {
            backend: StorageBackend::Memory,
            path: None,
        };
        assert!(open_event_store(&settings).unwrap().load().is_empty());
    }
}
