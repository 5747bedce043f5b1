//! Room system storage - named snapshots of the whole graph
//!
//! `save` captures the live graph and `read` replaces it. Both hold the room
//! system's graph lock for their whole duration, so a load never interleaves
//! with a mutation and a failed load leaves the graph exactly as it was.

mod snapshot;

use std::sync::Arc;

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};

use crate::rooms::{validate_name, NameError, RoomError, RoomSystem, RoomSystemResult};

pub use snapshot::{GraphSnapshot, SnapshotInfo, SnapshotStore, FORMAT_VERSION};

/// Snapshot storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid snapshot name: {0}")]
    InvalidName(#[from] NameError),

    #[error("snapshot '{0}' not found")]
    NotFound(String),

    #[error("unsupported snapshot format version {0}")]
    UnsupportedVersion(u32),

    #[error("snapshot is inconsistent: {0}")]
    Corrupt(RoomError),

    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Outcome of loading a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    Success,
    Fail,
}

impl ReadOutcome {
    pub fn result_code(&self) -> RoomSystemResult {
        match self {
            ReadOutcome::Success => RoomSystemResult::Success,
            ReadOutcome::Fail => RoomSystemResult::Fail,
        }
    }
}

/// Saves and restores the room system's graph by snapshot name
pub struct RoomSystemStorage {
    system: Arc<RoomSystem>,
    store: SnapshotStore,
}

impl RoomSystemStorage {
    pub fn new(system: Arc<RoomSystem>, pool: SqlitePool) -> Self {
        Self {
            system,
            store: SnapshotStore::new(pool),
        }
    }

    /// The room system this storage saves and restores
    pub fn room_system(&self) -> &Arc<RoomSystem> {
        &self.system
    }

    /// Save the whole graph under `name`, overwriting an older snapshot
    pub async fn save(&self, name: &str) -> Result<(), StorageError> {
        validate_name(name)?;

        let graph = self.system.lock().await;
        let snapshot = GraphSnapshot::capture(&graph);
        self.store.write(name, &snapshot).await?;

        info!(
            "Saved snapshot '{}' ({} rooms, {} links)",
            name,
            snapshot.rooms.len(),
            snapshot.links.len()
        );
        Ok(())
    }

    /// Replace the live graph with the snapshot `name`
    ///
    /// Any failure returns `Fail` and leaves the live graph untouched.
    pub async fn read(&self, name: &str) -> ReadOutcome {
        match self.try_read(name).await {
            Ok(()) => ReadOutcome::Success,
            Err(e) => {
                warn!("Failed to read snapshot '{}': {}", name, e);
                ReadOutcome::Fail
            }
        }
    }

    async fn try_read(&self, name: &str) -> Result<(), StorageError> {
        validate_name(name)?;

        let mut graph = self.system.lock().await;
        let snapshot = self
            .store
            .load(name)
            .await?
            .ok_or_else(|| StorageError::NotFound(name.to_string()))?;
        let loaded = snapshot.into_graph()?;

        info!(
            "Loaded snapshot '{}' ({} rooms, {} links)",
            name,
            loaded.room_count(),
            loaded.link_count()
        );
        *graph = loaded;
        Ok(())
    }

    /// List stored snapshots
    pub async fn list(&self) -> Result<Vec<SnapshotInfo>, StorageError> {
        self.store.list().await
    }
}
