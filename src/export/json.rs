//! JSON export and import of the snapshot

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NestError, NestResult};
use crate::models::Snapshot;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A snapshot wrapped with export metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub data: Snapshot,
}

impl SnapshotExport {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            data: snapshot,
        }
    }

    /// Check the schema major version is one we understand
    pub fn validate(&self) -> Result<(), String> {
        let major = self.schema_version.split('.').next().unwrap_or_default();
        if major != "1" {
            return Err(format!(
                "Unsupported export schema version: {}",
                self.schema_version
            ));
        }
        Ok(())
    }
}

/// Either a wrapped export or a bare snapshot
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportDocument {
    Wrapped(SnapshotExport),
    Bare(Snapshot),
}

/// Write the snapshot as pretty JSON
pub fn export_json<W: Write>(snapshot: &Snapshot, writer: &mut W) -> NestResult<()> {
    let export = SnapshotExport::new(snapshot.clone());
    serde_json::to_writer_pretty(&mut *writer, &export)?;
    writeln!(writer)?;
    Ok(())
}

/// Read a snapshot from an export file or a bare snapshot document
pub fn import_json(json_str: &str) -> NestResult<Snapshot> {
    let document: ImportDocument = serde_json::from_str(json_str)?;
    unwrap_document(document)
}

fn unwrap_document(document: ImportDocument) -> NestResult<Snapshot> {
    match document {
        ImportDocument::Wrapped(export) => {
            export.validate().map_err(NestError::Validation)?;
            Ok(export.data)
        }
        ImportDocument::Bare(snapshot) => Ok(snapshot),
    }
}

pub(crate) fn import_yaml_document(yaml_str: &str) -> NestResult<Snapshot> {
    let document: ImportDocument = serde_yaml::from_str(yaml_str)?;
    unwrap_document(document)
}
