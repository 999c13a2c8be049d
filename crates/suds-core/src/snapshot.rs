//! JSON snapshot import/export.
//!
//! A snapshot is a single pretty-printed JSON document: an envelope with a
//! format version and timestamp around one oil, one recipe, or a full
//! backup of both catalogs. The shapes match the original application's
//! export files, so snapshots round-trip between implementations.

use std::io::{self, Read, Write};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::oil::Oil;
use crate::recipe::Recipe;

/// The snapshot format version this build writes.
pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

/// Error type for snapshot operations.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported snapshot version {0} (newest supported is {CURRENT_SNAPSHOT_VERSION})")]
    UnsupportedVersion(u32),
}

/// Result alias for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// A versioned export envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: SnapshotPayload,
}

/// What a snapshot carries, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SnapshotPayload {
    Oil { data: Oil },
    Recipe { data: Recipe },
    Backup { oils: Vec<Oil>, recipes: Vec<Recipe> },
}

impl Snapshot {
    /// Wraps a single oil, stamped with the current time.
    pub fn oil(data: Oil) -> Self {
        Self::with_payload(SnapshotPayload::Oil { data })
    }

    /// Wraps a single recipe, stamped with the current time.
    pub fn recipe(data: Recipe) -> Self {
        Self::with_payload(SnapshotPayload::Recipe { data })
    }

    /// Wraps a full backup of both catalogs, stamped with the current time.
    pub fn backup(oils: Vec<Oil>, recipes: Vec<Recipe>) -> Self {
        Self::with_payload(SnapshotPayload::Backup { oils, recipes })
    }

    fn with_payload(payload: SnapshotPayload) -> Self {
        Self {
            version: CURRENT_SNAPSHOT_VERSION,
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Writes a snapshot as pretty-printed JSON.
pub fn write_snapshot<W: Write>(writer: &mut W, snapshot: &Snapshot) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, snapshot)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Reads a snapshot, rejecting versions newer than this build understands.
pub fn read_snapshot<R: Read>(reader: R) -> Result<Snapshot> {
    let snapshot: Snapshot = serde_json::from_reader(reader)?;
    if snapshot.version > CURRENT_SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(snapshot.version));
    }
    Ok(snapshot)
}
