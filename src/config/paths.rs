//! Path management for nestbook
//!
//! ## Path Resolution Order
//!
//! 1. `NESTBOOK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/nestbook` or `~/.config/nestbook`
//! 3. Windows: `%APPDATA%\nestbook`

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::NestError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "NESTBOOK_DATA_DIR";

/// Manages all paths used by nestbook
#[derive(Debug, Clone)]
pub struct NestPaths {
    /// Base directory for all nestbook data
    base_dir: PathBuf,
}

impl NestPaths {
    /// Create a new NestPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, NestError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create NestPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/nestbook/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding the durable databases
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the store configuration file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the flag store (PIN record, launch marker)
    pub fn flags_file(&self) -> PathBuf {
        self.base_dir.join("flags.json")
    }

    /// Get the directory of a named durable database
    pub fn database_dir(&self, name: &str) -> PathBuf {
        self.data_dir().join(name)
    }
}

fn resolve_default_path() -> Result<PathBuf, NestError> {
    // config_dir() honours XDG_CONFIG_HOME on Unix and maps to %APPDATA% on Windows
    let dirs = BaseDirs::new()
        .ok_or_else(|| NestError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("nestbook"))
}
