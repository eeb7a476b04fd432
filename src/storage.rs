// Persistence layer for the taskdeck engine
// A key-value medium behind a trait, with whole-collection atomic saves

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::models::{EngineError, EngineResult, TaskRecord};

/// Well-known storage key for the task collection
pub const TASKS_KEY: &str = "todos";

// ============================================
// KEY-VALUE MEDIUM
// ============================================

/// Durable key-value store consumed from the environment.
/// The engine never assumes the storage technology behind it.
pub trait KeyValueStore: Send + Sync {
    /// Read the value for a key; `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// Overwrite the value for a key. The write is all-or-nothing:
    /// a reader never observes a partial value.
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        (**self).set(key, value)
    }
}

/// Default data directory (~/.taskdeck/)
pub fn defaultDataDir() -> PathBuf {
    let home = dirs::home_dir().expect("Failed to get home directory");
    home.join(".taskdeck")
}

/// File-backed store: one JSON file per key under a base directory
pub struct JsonFileStore {
    baseDir: PathBuf,
}

impl JsonFileStore {
    pub fn new(baseDir: PathBuf) -> Self {
        Self { baseDir }
    }

    /// Store rooted at the default data directory
    pub fn atDefaultDir() -> Self {
        Self::new(defaultDataDir())
    }

    fn pathFor(&self, key: &str) -> PathBuf {
        self.baseDir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let path = self.pathFor(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path).map(Some).map_err(|e| e.to_string())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        fs::create_dir_all(&self.baseDir).map_err(|e| e.to_string())?;

        // Write to a temp file, then rename over the target. The rename is
        // the commit point, so readers see the old value or the new one,
        // never a torn write.
        let path = self.pathFor(key);
        let tmpPath = self.baseDir.join(format!(".{}.json.tmp", key));
        fs::write(&tmpPath, value).map_err(|e| e.to_string())?;
        fs::rename(&tmpPath, &path).map_err(|e| e.to_string())
    }
}

/// In-memory store for tests and hosts that bring their own persistence
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================
// PERSISTENCE ADAPTER
// ============================================

/// Sole boundary between the engine and the storage medium.
/// The whole collection round-trips through `save`/`load` as one unit.
pub struct PersistenceAdapter {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl PersistenceAdapter {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store, key: TASKS_KEY.to_string() }
    }

    /// Adapter bound to a non-default storage key (one engine instance
    /// owns one storage location for its entire lifetime)
    pub fn withKey(store: Box<dyn KeyValueStore>, key: &str) -> Self {
        Self { store, key: key.to_string() }
    }

    /// Load the collection. A missing or unparsable store degrades to an
    /// empty collection; startup never fails on corrupt data.
    pub fn load(&self) -> Vec<TaskRecord> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "storage unreadable, starting with empty collection");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<TaskRecord>>(&raw) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored collection unparsable, starting empty");
                Vec::new()
            }
        }
    }

    /// Save the whole collection as a single atomic write
    pub fn save(&self, tasks: &[TaskRecord]) -> EngineResult<()> {
        let raw = serde_json::to_string(tasks)
            .map_err(|e| EngineError::Persistence(format!("serialize failed: {}", e)))?;
        self.store
            .set(&self.key, &raw)
            .map_err(EngineError::Persistence)?;
        debug!(key = %self.key, count = tasks.len(), "collection saved");
        Ok(())
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sampleTask(id: i64, text: &str) -> TaskRecord {
        let now = Utc.with_ymd_and_hms(2026, 8, 29, 9, 0, 0).unwrap();
        TaskRecord::new(id, text.to_string(), None, None, now)
    }

    #[test]
    fn memory_store_round_trip() {
        let adapter = PersistenceAdapter::new(Box::new(MemoryStore::new()));
        let tasks = vec![sampleTask(1, "one"), sampleTask(2, "two")];
        adapter.save(&tasks).unwrap();
        assert_eq!(adapter.load(), tasks);
    }

    #[test]
    fn file_store_round_trip_survives_new_adapter() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = vec![sampleTask(1, "persist me")];
        {
            let adapter = PersistenceAdapter::new(Box::new(JsonFileStore::new(
                dir.path().to_path_buf(),
            )));
            adapter.save(&tasks).unwrap();
        }
        // Fresh adapter over the same directory simulates a process restart
        let adapter = PersistenceAdapter::new(Box::new(JsonFileStore::new(
            dir.path().to_path_buf(),
        )));
        assert_eq!(adapter.load(), tasks);
    }

    #[test]
    fn load_from_missing_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = PersistenceAdapter::new(Box::new(JsonFileStore::new(
            dir.path().to_path_buf(),
        )));
        assert!(adapter.load().is_empty());
    }

    #[test]
    fn load_from_corrupt_store_is_empty_not_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(format!("{}.json", TASKS_KEY)), "{not json!").unwrap();
        let adapter = PersistenceAdapter::new(Box::new(JsonFileStore::new(
            dir.path().to_path_buf(),
        )));
        assert!(adapter.load().is_empty());
    }

    #[test]
    fn save_overwrites_prior_content() {
        let adapter = PersistenceAdapter::new(Box::new(MemoryStore::new()));
        adapter.save(&[sampleTask(1, "old"), sampleTask(2, "older")]).unwrap();
        adapter.save(&[sampleTask(3, "new")]).unwrap();
        let loaded = adapter.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text, "new");
    }

    #[test]
    fn custom_key_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let a = PersistenceAdapter::withKey(
            Box::new(JsonFileStore::new(dir.path().to_path_buf())),
            "listA",
        );
        let b = PersistenceAdapter::withKey(
            Box::new(JsonFileStore::new(dir.path().to_path_buf())),
            "listB",
        );
        a.save(&[sampleTask(1, "a")]).unwrap();
        assert!(b.load().is_empty());
    }
}
