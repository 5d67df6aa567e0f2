//! YAML export functionality
//!
//! Human-readable dump of the snapshot.

use std::io::Write;

use crate::error::NestResult;
use crate::export::json::{import_yaml_document, SnapshotExport};
use crate::models::Snapshot;

/// Export the snapshot to YAML
pub fn export_yaml<W: Write>(snapshot: &Snapshot, writer: &mut W) -> NestResult<()> {
    let export = SnapshotExport::new(snapshot.clone());

    writeln!(writer, "# nestbook export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer, "#")?;
    writeln!(writer, "# This file is NOT obfuscated. Keep it somewhere private.")?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export)?;
    Ok(())
}

/// Import from a YAML export
pub fn import_yaml(yaml_str: &str) -> NestResult<Snapshot> {
    import_yaml_document(yaml_str)
}
