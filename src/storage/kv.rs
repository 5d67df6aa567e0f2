//! Durable key-value store adapter
//!
//! One named database holding exactly one object store. On disk a database is
//! a directory under the data dir:
//!
//! ```text
//! data/<database>/meta.json      { "version": 1, "stores": ["appData"] }
//! data/<database>/<store>.json   { "<key>": "<value>", ... }
//! ```
//!
//! Every operation opens the database afresh and runs as a single
//! transaction against the object store. Nothing is retried and there is no
//! timeout: a stalled filesystem call leaves the caller waiting.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::file_io::{create_json_if_absent_async, read_json_async, write_json_atomic_async};
use super::guard::EnvironmentGuard;
use crate::config::{NestPaths, StoreConfig};
use crate::error::{NestError, NestResult};

const META_FILE: &str = "meta.json";

/// Async get/put/clear over string keys
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> NestResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn put(&self, key: &str, value: &str) -> NestResult<()>;

    /// Remove every entry of the object store
    async fn clear(&self) -> NestResult<()>;
}

/// Database metadata written by the upgrade step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DatabaseMeta {
    version: u32,
    #[serde(default)]
    stores: Vec<String>,
}

type ObjectStore = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransactionMode {
    ReadOnly,
    ReadWrite,
}

/// An open database handle, scoped to the one object store
struct Database {
    store_path: PathBuf,
}

impl Database {
    async fn read_store(&self, mode: TransactionMode) -> NestResult<ObjectStore> {
        debug!(store = %self.store_path.display(), ?mode, "begin transaction");
        read_json_async::<ObjectStore, _>(&self.store_path)
            .await?
            .ok_or_else(|| {
                NestError::Storage(format!(
                    "Object store not found: {}",
                    self.store_path.display()
                ))
            })
    }

    async fn write_store(&self, store: &ObjectStore) -> NestResult<()> {
        write_json_atomic_async(&self.store_path, store).await
    }
}

/// Directory-backed durable store
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
    store_name: String,
    version: u32,
    guard: EnvironmentGuard,
}

impl FileKeyValueStore {
    /// Adapter for the database named in `config`, under the data dir of `paths`
    pub fn new(paths: &NestPaths, config: &StoreConfig, guard: EnvironmentGuard) -> Self {
        Self {
            root: paths.database_dir(&config.database_name),
            store_name: config.store_name.clone(),
            version: config.schema_version,
            guard,
        }
    }

    fn store_path(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.store_name))
    }

    /// Open the database at the configured version, upgrading it if needed
    async fn open(&self) -> NestResult<Database> {
        if !self.guard.is_persistable() {
            return Err(NestError::Unavailable(
                "durable storage is not available".into(),
            ));
        }

        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            NestError::Storage(format!(
                "Failed to open database {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let meta_path = self.root.join(META_FILE);
        let meta: Option<DatabaseMeta> = read_json_async(&meta_path).await?;
        let current = meta.as_ref().map_or(0, |m| m.version);

        if current > self.version {
            return Err(NestError::Storage(format!(
                "Database {} is at version {}, newer than requested version {}",
                self.root.display(),
                current,
                self.version
            )));
        }

        if current < self.version {
            self.upgrade(meta.unwrap_or_default(), current).await?;
        }

        Ok(Database {
            store_path: self.store_path(),
        })
    }

    /// Create the object store if it does not exist and record the new version
    async fn upgrade(&self, mut meta: DatabaseMeta, from: u32) -> NestResult<()> {
        debug!(
            database = %self.root.display(),
            from,
            to = self.version,
            "upgrading database"
        );

        // Never replaces a store another operation already created or filled
        let created = create_json_if_absent_async(self.store_path(), &ObjectStore::new()).await?;
        if created {
            debug!(store = %self.store_name, "created object store");
        }

        if !meta.stores.contains(&self.store_name) {
            meta.stores.push(self.store_name.clone());
        }
        meta.version = self.version;

        write_json_atomic_async(self.root.join(META_FILE), &meta).await
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> NestResult<Option<String>> {
        let db = self.open().await?;
        let store = db.read_store(TransactionMode::ReadOnly).await?;
        Ok(store.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> NestResult<()> {
        let db = self.open().await?;
        let mut store = db.read_store(TransactionMode::ReadWrite).await?;
        store.insert(key.to_string(), value.to_string());
        db.write_store(&store).await
    }

    async fn clear(&self) -> NestResult<()> {
        let db = self.open().await?;
        // Read first so a missing object store fails like any other transaction
        db.read_store(TransactionMode::ReadWrite).await?;
        db.write_store(&ObjectStore::new()).await
    }
}

/// In-memory store for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    data: RwLock<HashMap<String, String>>,
    failing: bool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails, as if the database could not open
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    fn check(&self) -> NestResult<()> {
        if self.failing {
            return Err(NestError::Storage("database failed to open".into()));
        }
        Ok(())
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.data.read().map(|data| data.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> NestResult<Option<String>> {
        self.check()?;
        let data = self
            .data
            .read()
            .map_err(|e| NestError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> NestResult<()> {
        self.check()?;
        let mut data = self
            .data
            .write()
            .map_err(|e| NestError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self) -> NestResult<()> {
        self.check()?;
        let mut data = self
            .data
            .write()
            .map_err(|e| NestError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.clear();
        Ok(())
    }
}
