//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure. Temp
//! files get a unique name so concurrent writers never share one; the last
//! rename wins and readers only ever see a complete file.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::NestError;

/// Unique sibling temp path for an atomic write
fn temp_path_for(path: &Path) -> PathBuf {
    path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()))
}

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, NestError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| NestError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| NestError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), NestError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            NestError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file lives in the same directory so the rename stays atomic
    let temp_path = temp_path_for(path);

    // Write to temp file
    let file = File::create(&temp_path)
        .map_err(|e| NestError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| NestError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| NestError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| NestError::Storage(format!("Failed to sync data: {}", e)))?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| {
        // Try to clean up temp file if rename fails
        let _ = fs::remove_file(&temp_path);
        NestError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Read JSON from a file without blocking the runtime.
///
/// Returns `None` when the file does not exist.
pub async fn read_json_async<T, P>(path: P) -> Result<Option<T>, NestError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(NestError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| NestError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Serialize `data` into a fresh, synced temp file next to `path`
async fn write_temp_async<T: Serialize>(path: &Path, data: &T) -> Result<PathBuf, NestError> {
    let contents = serde_json::to_vec_pretty(data)
        .map_err(|e| NestError::Storage(format!("Failed to serialize data: {}", e)))?;

    let temp_path = temp_path_for(path);

    let mut file = tokio::fs::File::create(&temp_path)
        .await
        .map_err(|e| NestError::Storage(format!("Failed to create temp file: {}", e)))?;

    file.write_all(&contents)
        .await
        .map_err(|e| NestError::Storage(format!("Failed to write data: {}", e)))?;

    // Sync to disk before the file becomes visible under its real name
    file.sync_all()
        .await
        .map_err(|e| NestError::Storage(format!("Failed to sync data: {}", e)))?;

    Ok(temp_path)
}

/// Async counterpart of [`write_json_atomic`]
pub async fn write_json_atomic_async<T, P>(path: P, data: &T) -> Result<(), NestError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = write_temp_async(path, data).await?;

    // Atomic rename
    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(NestError::Storage(format!(
            "Failed to rename temp file: {}",
            e
        )));
    }

    Ok(())
}

/// Create `path` holding `data` unless it already exists.
///
/// The complete file is hard-linked into place, so creation is atomic with
/// respect to other writers: an existing file is never replaced, and nobody
/// observes a half-written one. Returns whether this call created the file.
pub async fn create_json_if_absent_async<T, P>(path: P, data: &T) -> Result<bool, NestError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = write_temp_async(path, data).await?;

    let linked = tokio::fs::hard_link(&temp_path, path).await;
    let _ = tokio::fs::remove_file(&temp_path).await;

    match linked {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(NestError::Storage(format!(
            "Failed to create {}: {}",
            path.display(),
            e
        ))),
    }
}
