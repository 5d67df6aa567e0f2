//! Persistence service
//!
//! The only access path to stored data. Composes the environment guard, the
//! obfuscation codec, the durable key-value store and the flag store.
//!
//! Nothing here returns an error. Store failures and corrupt data are logged
//! and turned into safe defaults: `None` for loads, silent completion for
//! writes, `false` for checks. Overlapping saves are not serialized; the last
//! write to complete wins.

use tracing::{debug, error, warn};

use crate::config::{NestPaths, StoreConfig};
use crate::crypto::obfuscation::Codec;
use crate::crypto::pin;
use crate::models::Snapshot;
use crate::storage::{
    EnvironmentGuard, FileFlagStore, FileKeyValueStore, FlagStore, KeyValueStore,
};

const LAUNCHED_VALUE: &str = "true";

/// Facade over snapshot, PIN and first-launch persistence
pub struct PersistenceService<K, F> {
    config: StoreConfig,
    guard: EnvironmentGuard,
    codec: Codec,
    kv: K,
    flags: F,
}

impl PersistenceService<FileKeyValueStore, FileFlagStore> {
    /// Service over the file-backed stores under `paths`
    pub fn open_default(paths: &NestPaths, config: StoreConfig) -> Self {
        let guard = EnvironmentGuard::for_paths(paths);
        let kv = FileKeyValueStore::new(paths, &config, guard.clone());
        let flags = FileFlagStore::new(paths.flags_file());
        Self::new(config, guard, kv, flags)
    }
}

impl<K: KeyValueStore, F: FlagStore> PersistenceService<K, F> {
    pub fn new(config: StoreConfig, guard: EnvironmentGuard, kv: K, flags: F) -> Self {
        let codec = Codec::new(config.obfuscation_key.clone());
        Self {
            config,
            guard,
            codec,
            kv,
            flags,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Whether durable storage is currently usable
    pub fn is_persistable(&self) -> bool {
        self.guard.is_persistable()
    }

    // ---- PIN ----

    /// True iff a PIN record is present
    pub fn has_pin(&self) -> bool {
        if !self.guard.is_persistable() {
            return false;
        }
        self.stored_pin().is_some()
    }

    /// True iff `candidate` matches the stored PIN record
    pub fn verify_pin(&self, candidate: &str) -> bool {
        if !self.guard.is_persistable() {
            return false;
        }
        self.stored_pin()
            .map_or(false, |record| pin::matches(&record, candidate))
    }

    /// Store a PIN, replacing any previous one. An empty PIN is ignored.
    pub fn set_pin(&self, new_pin: &str) {
        if !self.guard.is_persistable() {
            return;
        }
        if new_pin.is_empty() {
            warn!("ignoring empty PIN");
            return;
        }
        self.flags.set(&self.config.pin_key, &pin::encode(new_pin));
    }

    pub fn remove_pin(&self) {
        if !self.guard.is_persistable() {
            return;
        }
        self.flags.remove(&self.config.pin_key);
    }

    /// An empty record counts as no record
    fn stored_pin(&self) -> Option<String> {
        self.flags
            .get(&self.config.pin_key)
            .filter(|record| !record.is_empty())
    }

    // ---- first launch ----

    /// True iff the launch marker is absent. False when storage is
    /// unavailable, so headless runs never show first-run screens.
    pub fn is_first_launch(&self) -> bool {
        if !self.guard.is_persistable() {
            return false;
        }
        !self.flags.contains(&self.config.launched_key)
    }

    pub fn set_launched(&self) {
        if !self.guard.is_persistable() {
            return;
        }
        self.flags.set(&self.config.launched_key, LAUNCHED_VALUE);
    }

    // ---- snapshot ----

    /// Serialize, obfuscate and store the snapshot. Failures are logged only.
    pub async fn save_data(&self, snapshot: &Snapshot) {
        if !self.guard.is_persistable() {
            return;
        }

        let canonical = match snapshot.to_canonical() {
            Ok(text) => text,
            Err(e) => {
                error!("failed to serialize snapshot: {}", e);
                return;
            }
        };

        let obfuscated = self.codec.encode(&canonical);
        if obfuscated.is_empty() {
            error!("failed to obfuscate snapshot; nothing saved");
            return;
        }

        match self.kv.put(&self.config.snapshot_key, &obfuscated).await {
            Ok(()) => debug!(bytes = obfuscated.len(), "snapshot saved"),
            Err(e) => error!("failed to save snapshot: {}", e),
        }
    }

    /// Load the snapshot. Missing, undecodable or unparseable data all read
    /// as `None`.
    pub async fn load_data(&self) -> Option<Snapshot> {
        if !self.guard.is_persistable() {
            return None;
        }

        let raw = match self.kv.get(&self.config.snapshot_key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                error!("failed to load snapshot: {}", e);
                return None;
            }
        };

        let canonical = self.codec.decode(&raw);
        if canonical.is_empty() {
            warn!("stored snapshot could not be decoded; treating as absent");
            return None;
        }

        match Snapshot::from_canonical(&canonical) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("stored snapshot is corrupt; treating as absent: {}", e);
                None
            }
        }
    }

    /// Remove the PIN record, the launch marker and the snapshot. Not atomic:
    /// the flag removals stand even if clearing the durable store fails.
    pub async fn clear_data(&self) {
        if !self.guard.is_persistable() {
            return;
        }

        self.flags.remove(&self.config.pin_key);
        self.flags.remove(&self.config.launched_key);

        if let Err(e) = self.kv.clear().await {
            error!("failed to clear durable store: {}", e);
        }
    }
}
