//! Export module for nestbook
//!
//! Plain-text dumps of the snapshot for backup or hand inspection:
//! - JSON: machine-readable, also accepted by `import`
//! - YAML: human-readable

pub mod json;
pub mod yaml;

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;

use crate::error::NestResult;
use crate::models::Snapshot;

pub use json::{export_json, import_json, SnapshotExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_yaml, import_yaml};

/// Output format for `export`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

/// Write the snapshot in the requested format
pub fn write_snapshot<W: Write>(
    snapshot: &Snapshot,
    format: ExportFormat,
    writer: &mut W,
) -> NestResult<()> {
    match format {
        ExportFormat::Json => export_json(snapshot, writer),
        ExportFormat::Yaml => export_yaml(snapshot, writer),
    }
}

/// Read a snapshot from a file, choosing the parser by extension
pub fn read_snapshot_file(path: &Path) -> NestResult<Snapshot> {
    let contents = std::fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        import_yaml(&contents)
    } else {
        import_json(&contents)
    }
}
