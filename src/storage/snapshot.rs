//! Snapshot encoding and SQLite-backed snapshot store

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;

use super::StorageError;
use crate::rooms::{Link, Room, RoomGraph};

/// Current snapshot encoding version
pub const FORMAT_VERSION: u32 = 1;

/// Serializable capture of a whole room graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub format_version: u32,
    pub rooms: Vec<Room>,
    pub links: Vec<Link>,
}

impl GraphSnapshot {
    /// Capture every room and link of `graph`
    pub fn capture(graph: &RoomGraph) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            rooms: graph.rooms().cloned().collect(),
            links: graph.links().cloned().collect(),
        }
    }

    /// Rebuild a graph, applying the same invariants as live mutations
    pub fn into_graph(self) -> Result<RoomGraph, StorageError> {
        if self.format_version != FORMAT_VERSION {
            return Err(StorageError::UnsupportedVersion(self.format_version));
        }

        let mut graph = RoomGraph::new();
        for room in &self.rooms {
            graph
                .insert_room(&room.name, room.first_point, room.second_point)
                .map_err(StorageError::Corrupt)?;
        }
        for link in &self.links {
            graph
                .add_link(&link.from, &link.to)
                .map_err(StorageError::Corrupt)?;
        }
        Ok(graph)
    }
}

/// Summary of a stored snapshot
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SnapshotInfo {
    pub name: String,
    pub room_count: i64,
    pub link_count: i64,
    pub saved_at: String,
}

/// Snapshot persistence over SQLite
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    pool: SqlitePool,
}

impl SnapshotStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Write a snapshot, replacing any snapshot with the same name
    pub async fn write(&self, name: &str, snapshot: &GraphSnapshot) -> Result<(), StorageError> {
        let data = serde_json::to_string(snapshot)?;
        let saved_at = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO snapshots (name, format_version, room_count, link_count, data, saved_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET
                format_version = excluded.format_version,
                room_count = excluded.room_count,
                link_count = excluded.link_count,
                data = excluded.data,
                saved_at = excluded.saved_at
            "#,
        )
        .bind(name)
        .bind(i64::from(snapshot.format_version))
        .bind(snapshot.rooms.len() as i64)
        .bind(snapshot.links.len() as i64)
        .bind(&data)
        .bind(&saved_at)
        .execute(&self.pool)
        .await?;

        debug!("Wrote snapshot '{}' ({} bytes)", name, data.len());
        Ok(())
    }

    /// Load a snapshot by name; `Ok(None)` if no such snapshot exists
    pub async fn load(&self, name: &str) -> Result<Option<GraphSnapshot>, StorageError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT data FROM snapshots WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some((data,)) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    /// List stored snapshots, sorted by name
    pub async fn list(&self) -> Result<Vec<SnapshotInfo>, StorageError> {
        let rows: Vec<SnapshotInfo> = sqlx::query_as(
            "SELECT name, room_count, link_count, saved_at FROM snapshots ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
