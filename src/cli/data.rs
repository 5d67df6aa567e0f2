//! Snapshot CLI commands
//!
//! Import, export, clear and inspect the stored journal snapshot.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::NestPaths;
use crate::display::{format_snapshot_summary, yes_no};
use crate::error::{NestError, NestResult};
use crate::export::{read_snapshot_file, write_snapshot, ExportFormat};
use crate::services::PersistenceService;
use crate::storage::{FlagStore, KeyValueStore};

use super::pin::{require_persistable, unlock};

/// Print paths, guard state, PIN/launch flags and snapshot counts
pub async fn show_status<K: KeyValueStore, F: FlagStore>(
    paths: &NestPaths,
    service: &PersistenceService<K, F>,
) -> NestResult<()> {
    println!("nestbook status");
    println!("===============");
    println!("Data directory:  {}", paths.base_dir().display());
    println!("Persistable:     {}", yes_no(service.is_persistable()));
    println!("PIN protection:  {}", yes_no(service.has_pin()));
    println!("First launch:    {}", yes_no(service.is_first_launch()));
    println!();

    // Counts reveal nothing private, so status does not ask for the PIN
    match service.load_data().await {
        Some(snapshot) => println!("{}", format_snapshot_summary(&snapshot)),
        None => println!("No saved data."),
    }

    Ok(())
}

/// Mark the first launch as done
pub fn mark_launched<K: KeyValueStore, F: FlagStore>(
    service: &PersistenceService<K, F>,
) -> NestResult<()> {
    require_persistable(service)?;

    if service.is_first_launch() {
        service.set_launched();
        println!("First launch recorded.");
    } else {
        println!("Already launched before.");
    }
    Ok(())
}

/// Replace the stored snapshot with the contents of a file
pub async fn import_snapshot<K: KeyValueStore, F: FlagStore>(
    service: &PersistenceService<K, F>,
    pin: Option<&str>,
    file: &Path,
) -> NestResult<()> {
    require_persistable(service)?;
    unlock(service, pin)?;

    let snapshot = read_snapshot_file(file)?;
    service.save_data(&snapshot).await;

    // save_data never reports failure, so read back to tell the user
    match service.load_data().await {
        Some(stored) if stored == snapshot => {
            println!("Imported snapshot from {}", file.display());
            println!("{}", format_snapshot_summary(&stored));
            Ok(())
        }
        _ => Err(NestError::Storage(
            "Snapshot could not be saved; see log output for details".into(),
        )),
    }
}

/// Write the stored snapshot to stdout or a file
pub async fn export_snapshot<K: KeyValueStore, F: FlagStore>(
    service: &PersistenceService<K, F>,
    pin: Option<&str>,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> NestResult<()> {
    unlock(service, pin)?;

    let snapshot = service
        .load_data()
        .await
        .ok_or_else(|| NestError::Storage("No saved data".into()))?;

    match output {
        Some(path) => {
            let mut file = std::fs::File::create(&path)?;
            write_snapshot(&snapshot, format, &mut file)?;
            file.flush()?;
            eprintln!("Exported snapshot to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_snapshot(&snapshot, format, &mut handle)?;
            handle.flush()?;
        }
    }

    Ok(())
}

/// Wipe the PIN, launch marker and snapshot
pub async fn clear_all<K: KeyValueStore, F: FlagStore>(
    service: &PersistenceService<K, F>,
    pin: Option<&str>,
    yes: bool,
) -> NestResult<()> {
    require_persistable(service)?;
    unlock(service, pin)?;

    if !yes {
        print!("This deletes ALL journal data and the PIN. Continue? (yes/no): ");
        std::io::stdout().flush()?;

        let mut confirm = String::new();
        std::io::stdin().read_line(&mut confirm)?;

        if confirm.trim().to_lowercase() != "yes" {
            println!("Aborted.");
            return Ok(());
        }
    }

    service.clear_data().await;
    println!("All data cleared.");
    Ok(())
}

/// Write the resolved store configuration to the config file, leaving an
/// existing file untouched
pub fn init_config<K: KeyValueStore, F: FlagStore>(
    paths: &NestPaths,
    service: &PersistenceService<K, F>,
) -> NestResult<()> {
    require_persistable(service)?;

    let settings_path = paths.settings_file();
    if settings_path.exists() {
        println!("Config file already exists: {}", settings_path.display());
        return Ok(());
    }

    service.config().save(paths)?;
    println!("Wrote {}", settings_path.display());
    Ok(())
}
