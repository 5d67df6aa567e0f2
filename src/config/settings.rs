//! Store configuration for nestbook
//!
//! Names the durable database, its object store, the fixed logical keys and
//! the obfuscation key. The service holds one of these; nothing here is
//! process-wide state.

use serde::{Deserialize, Serialize};

use super::paths::NestPaths;
use crate::crypto::obfuscation::V1_KEY;
use crate::error::NestError;

/// Configuration for the persistence service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name of the durable database
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// Name of the single object store inside the database
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Schema version requested when opening the database
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Key the snapshot is stored under
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,

    /// Flag store key of the PIN record
    #[serde(default = "default_pin_key")]
    pub pin_key: String,

    /// Flag store key of the launch marker
    #[serde(default = "default_launched_key")]
    pub launched_key: String,

    /// Obfuscation key. Bound to the `v1` data format, so never read from
    /// or written to the config file.
    #[serde(skip, default = "default_obfuscation_key")]
    pub obfuscation_key: String,
}

fn default_database_name() -> String {
    "nestbook".to_string()
}

fn default_store_name() -> String {
    "appData".to_string()
}

fn default_schema_version() -> u32 {
    1
}

fn default_snapshot_key() -> String {
    "appData".to_string()
}

fn default_pin_key() -> String {
    "app_pin".to_string()
}

fn default_launched_key() -> String {
    "has_launched".to_string()
}

fn default_obfuscation_key() -> String {
    V1_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_name: default_database_name(),
            store_name: default_store_name(),
            schema_version: default_schema_version(),
            snapshot_key: default_snapshot_key(),
            pin_key: default_pin_key(),
            launched_key: default_launched_key(),
            obfuscation_key: default_obfuscation_key(),
        }
    }
}

impl StoreConfig {
    /// Load the config from disk, or fall back to defaults if no file exists
    pub fn load_or_default(paths: &NestPaths) -> Result<Self, NestError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| NestError::Io(format!("Failed to read config file: {}", e)))?;

        let config: StoreConfig = serde_json::from_str(&contents)
            .map_err(|e| NestError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save the config to disk
    pub fn save(&self, paths: &NestPaths) -> Result<(), NestError> {
        std::fs::create_dir_all(paths.base_dir())
            .map_err(|e| NestError::Io(format!("Failed to create base directory: {}", e)))?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| NestError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| NestError::Io(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Reject names that cannot be used as directory or file names
    pub fn validate(&self) -> Result<(), NestError> {
        for (field, value) in [
            ("database_name", &self.database_name),
            ("store_name", &self.store_name),
        ] {
            if value.is_empty() || value.contains(['/', '\\']) || value.starts_with('.') {
                return Err(NestError::Config(format!(
                    "Invalid {}: '{}'",
                    field, value
                )));
            }
        }

        if self.schema_version == 0 {
            return Err(NestError::Config("schema_version must be at least 1".into()));
        }

        for (field, value) in [
            ("snapshot_key", &self.snapshot_key),
            ("pin_key", &self.pin_key),
            ("launched_key", &self.launched_key),
        ] {
            if value.is_empty() {
                return Err(NestError::Config(format!("{} cannot be empty", field)));
            }
        }

        if self.pin_key == self.launched_key {
            return Err(NestError::Config(
                "pin_key and launched_key must differ".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.database_name, "nestbook");
        assert_eq!(config.schema_version, 1);
        assert_eq!(config.snapshot_key, "appData");
        assert_eq!(config.pin_key, "app_pin");
        assert_eq!(config.launched_key, "has_launched");
        assert_eq!(config.obfuscation_key, V1_KEY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NestPaths::with_base_dir(temp_dir.path().to_path_buf());

        let config = StoreConfig::load_or_default(&paths).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NestPaths::with_base_dir(temp_dir.path().to_path_buf());

        let config = StoreConfig {
            database_name: "journal".into(),
            ..StoreConfig::default()
        };
        config.save(&paths).unwrap();

        let loaded = StoreConfig::load_or_default(&paths).unwrap();
        assert_eq!(loaded.database_name, "journal");
        assert_eq!(loaded.obfuscation_key, V1_KEY);
    }

    #[test]
    fn test_obfuscation_key_not_serialized() {
        let json = serde_json::to_string(&StoreConfig::default()).unwrap();
        assert!(!json.contains("obfuscation_key"));

        let loaded: StoreConfig =
            serde_json::from_str(r#"{"obfuscation_key": "other"}"#).unwrap();
        assert_eq!(loaded.obfuscation_key, V1_KEY);
    }

    #[test]
    fn test_invalid_names_rejected() {
        let config = StoreConfig {
            store_name: "../escape".into(),
            ..StoreConfig::default()
        };
        assert!(config.validate().is_err());

        let config = StoreConfig {
            launched_key: "app_pin".into(),
            ..StoreConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
