//! Roster snapshots on disk.
//!
//! A snapshot is a JSON envelope around the profession list. Characters are
//! nested inside their profession and carry no back-reference; loading
//! rebuilds every back-reference so it points into the freshly decoded roster.

use crate::domain::model::{Profession, Roster};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, RosterError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_FORMAT: &str = "prof-roster/snapshot";
pub const SNAPSHOT_VERSION: u32 = 1;
pub const DEFAULT_SNAPSHOT_PATH: &str = "prof.bin";

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEnvelope {
    format: String,
    version: u32,
    saved_at: DateTime<Utc>,
    professions: Vec<Profession>,
}

pub fn encode(roster: &Roster) -> Result<Vec<u8>> {
    #[derive(Serialize)]
    struct EnvelopeRef<'a> {
        format: &'a str,
        version: u32,
        saved_at: DateTime<Utc>,
        professions: &'a [Profession],
    }

    let envelope = EnvelopeRef {
        format: SNAPSHOT_FORMAT,
        version: SNAPSHOT_VERSION,
        saved_at: Utc::now(),
        professions: roster.professions(),
    };
    Ok(serde_json::to_vec_pretty(&envelope)?)
}

pub fn decode(bytes: &[u8]) -> Result<Roster> {
    let envelope: SnapshotEnvelope = serde_json::from_slice(bytes)?;

    if envelope.format != SNAPSHOT_FORMAT {
        return Err(RosterError::SnapshotError {
            message: format!("unexpected format '{}'", envelope.format),
        });
    }
    if envelope.version != SNAPSHOT_VERSION {
        return Err(RosterError::SnapshotError {
            message: format!(
                "unsupported version {} (expected {})",
                envelope.version, SNAPSHOT_VERSION
            ),
        });
    }

    tracing::debug!("Decoded snapshot saved at {}", envelope.saved_at);
    Ok(Roster::from_professions(envelope.professions))
}

/// Saves and loads roster snapshots through a [`Storage`] backend.
pub struct SnapshotStore<S: Storage> {
    storage: S,
}

impl<S: Storage> SnapshotStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn save(&self, roster: &Roster, path: &str) -> Result<()> {
        let bytes = encode(roster)?;
        self.storage.write_file(path, &bytes).await?;
        tracing::info!(
            "Snapshot of {} professions written to {} ({} bytes)",
            roster.professions().len(),
            path,
            bytes.len()
        );
        Ok(())
    }

    pub async fn load(&self, path: &str) -> Result<Roster> {
        let bytes = self.storage.read_file(path).await?;
        let roster = decode(&bytes)?;
        tracing::info!(
            "Snapshot {} loaded: {} professions, {} characters",
            path,
            roster.professions().len(),
            roster.character_count()
        );
        Ok(roster)
    }
}
