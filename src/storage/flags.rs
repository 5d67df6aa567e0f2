//! Synchronous flag store
//!
//! Holds the small values read on nearly every launch: the PIN record and the
//! launch marker. A missing key is the canonical "disabled" state. Failures
//! never surface; they are logged and read back as absent.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::warn;

use super::file_io::{read_json, write_json_atomic};

/// Synchronous get/set/remove over string keys
pub trait FlagStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);

    /// Whether `key` is present
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Flag store backed by a JSON object file
#[derive(Debug, Clone)]
pub struct FileFlagStore {
    path: PathBuf,
}

impl FileFlagStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load(&self) -> Option<BTreeMap<String, String>> {
        match read_json(&self.path) {
            Ok(flags) => Some(flags),
            Err(e) => {
                warn!("flag store unreadable: {}", e);
                None
            }
        }
    }

    fn update(&self, key: &str, change: impl FnOnce(&mut BTreeMap<String, String>)) {
        // An unreadable file is replaced rather than left blocking every write
        let mut flags = self.load().unwrap_or_default();
        change(&mut flags);
        if let Err(e) = write_json_atomic(&self.path, &flags) {
            warn!(key, "flag store write failed: {}", e);
        }
    }
}

impl FlagStore for FileFlagStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load()?.remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.update(key, |flags| {
            flags.insert(key.to_string(), value.to_string());
        });
    }

    fn remove(&self, key: &str) {
        if !self.path.exists() {
            return;
        }
        self.update(key, |flags| {
            flags.remove(key);
        });
    }
}

/// In-memory flag store
#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        match self.data.write() {
            Ok(mut data) => {
                data.insert(key.to_string(), value.to_string());
            }
            Err(e) => warn!(key, "flag store lock poisoned: {}", e),
        }
    }

    fn remove(&self, key: &str) {
        match self.data.write() {
            Ok(mut data) => {
                data.remove(key);
            }
            Err(e) => warn!(key, "flag store lock poisoned: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, FileFlagStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileFlagStore::new(temp_dir.path().join("flags.json"));
        (temp_dir, store)
    }

    #[test]
    fn test_absent_by_default() {
        let (_temp_dir, store) = create_test_store();
        assert_eq!(store.get("app_pin"), None);
        assert!(!store.contains("has_launched"));
    }

    #[test]
    fn test_set_get_remove() {
        let (_temp_dir, store) = create_test_store();

        store.set("app_pin", "MTIzNA==");
        store.set("has_launched", "true");
        assert_eq!(store.get("app_pin"), Some("MTIzNA==".to_string()));

        store.remove("app_pin");
        assert_eq!(store.get("app_pin"), None);
        assert!(store.contains("has_launched"));
    }

    #[test]
    fn test_persists_across_instances() {
        let (temp_dir, store) = create_test_store();
        store.set("has_launched", "true");

        let reopened = FileFlagStore::new(temp_dir.path().join("flags.json"));
        assert!(reopened.contains("has_launched"));
    }

    #[test]
    fn test_remove_without_file_creates_nothing() {
        let (_temp_dir, store) = create_test_store();
        store.remove("app_pin");
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_reads_absent_and_is_replaced() {
        let (_temp_dir, store) = create_test_store();
        std::fs::write(store.path(), "{{{").unwrap();

        assert_eq!(store.get("app_pin"), None);

        store.set("app_pin", "x");
        assert_eq!(store.get("app_pin"), Some("x".to_string()));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryFlagStore::new();
        assert!(!store.contains("k"));
        store.set("k", "v");
        assert_eq!(store.get("k"), Some("v".to_string()));
        store.remove("k");
        assert!(!store.contains("k"));
    }
}
