//! Environment guard
//!
//! Answers one question: can durable storage be used right now? Every public
//! persistence operation asks first and falls back to a safe default when the
//! answer is no.

use std::path::{Path, PathBuf};

use crate::config::paths::NestPaths;

/// Setting this to `1`, `true` or `yes` forces headless (non-persistable) mode
pub const HEADLESS_ENV: &str = "NESTBOOK_HEADLESS";

#[derive(Debug, Clone)]
enum Mode {
    /// Probe the filesystem under this base directory on every call
    Probe(PathBuf),
    Fixed(bool),
}

/// Predicate gating all persistence operations
#[derive(Debug, Clone)]
pub struct EnvironmentGuard {
    mode: Mode,
}

impl EnvironmentGuard {
    /// Guard that checks the base directory of `paths`
    pub fn for_paths(paths: &NestPaths) -> Self {
        Self {
            mode: Mode::Probe(paths.base_dir().clone()),
        }
    }

    /// Guard that always reports durable storage as available
    pub fn available() -> Self {
        Self {
            mode: Mode::Fixed(true),
        }
    }

    /// Guard for headless contexts: nothing is ever persisted
    pub fn unavailable() -> Self {
        Self {
            mode: Mode::Fixed(false),
        }
    }

    /// Whether durable storage can be used. Reads metadata only.
    pub fn is_persistable(&self) -> bool {
        match &self.mode {
            Mode::Fixed(value) => *value,
            Mode::Probe(base_dir) => !headless_requested() && has_writable_ancestor(base_dir),
        }
    }
}

fn headless_requested() -> bool {
    std::env::var(HEADLESS_ENV)
        .map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            )
        })
        .unwrap_or(false)
}

/// The nearest existing ancestor decides: it must be a writable directory
fn has_writable_ancestor(path: &Path) -> bool {
    for ancestor in path.ancestors() {
        if let Ok(meta) = std::fs::metadata(ancestor) {
            return meta.is_dir() && !meta.permissions().readonly();
        }
    }
    false
}
