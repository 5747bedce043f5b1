//! Room system - validated create/delete/link/unlink over the shared graph
//!
//! Provides:
//! - Selection-gated room creation and linking
//! - Cascading room deletion with one-way link reporting
//! - Read-only views for display
//!
//! All check-then-mutate sequences run under one lock on the graph. The
//! same lock is taken by snapshot save/load.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use super::error::RoomError;
use super::graph::{RoomDeletion, RoomGraph};
use super::room::{CallerId, Link, Point, Room};
use super::selection::SelectionSource;

/// Facade over the room graph
#[derive(Debug, Default)]
pub struct RoomSystem {
    graph: Mutex<RoomGraph>,
}

impl RoomSystem {
    /// Create a room system with an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room system around an existing graph
    pub fn with_graph(graph: RoomGraph) -> Self {
        Self {
            graph: Mutex::new(graph),
        }
    }

    /// Create a shared instance
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Exclusive access to the graph, for whole-graph operations
    pub(crate) async fn lock(&self) -> MutexGuard<'_, RoomGraph> {
        self.graph.lock().await
    }

    /// Create a room from the caller's two selected points
    ///
    /// Checks run in order: selection complete, name valid, name free.
    /// The graph owns the name checks.
    pub async fn create_room<S>(
        &self,
        selections: &S,
        caller: CallerId,
        name: &str,
    ) -> Result<Room, RoomError>
    where
        S: SelectionSource + ?Sized,
    {
        let selection = selections.selection(caller);
        let (first, second) = selection
            .points()
            .ok_or(RoomError::IncompleteSelection {
                required: 2,
                marked: selection.marked(),
            })?;

        let mut graph = self.graph.lock().await;
        graph.insert_room(name, first, second)?;
        info!("Created room '{}' {} - {} for {}", name, first, second, caller);

        Ok(Room::new(name, first, second))
    }

    /// Delete a room and every link touching it
    pub async fn delete_room(&self, name: &str) -> Result<RoomDeletion, RoomError> {
        let deletion = self.graph.lock().await.remove_room(name)?;
        if deletion.one_way {
            info!(
                "Deleted room '{}' with {} links, some one-way",
                name,
                deletion.dropped_links.len()
            );
        } else {
            info!(
                "Deleted room '{}' with {} links",
                name,
                deletion.dropped_links.len()
            );
        }
        Ok(deletion)
    }

    /// Delete every room and link
    pub async fn delete_all_rooms(&self) {
        let mut graph = self.graph.lock().await;
        let rooms = graph.room_count();
        graph.clear_all();
        info!("Deleted all {} rooms", rooms);
    }

    /// Link `first` to `second`
    ///
    /// The caller must have at least one marked point. The point itself is
    /// not used.
    pub async fn link<S>(
        &self,
        selections: &S,
        caller: CallerId,
        first: &str,
        second: &str,
    ) -> Result<(), RoomError>
    where
        S: SelectionSource + ?Sized,
    {
        let mut graph = self.graph.lock().await;

        for name in [first, second] {
            if !graph.room_exists(name) {
                return Err(RoomError::RoomNotFound(name.to_string()));
            }
        }
        if first == second {
            return Err(RoomError::SameRoom(first.to_string()));
        }

        let marked = selections.selection(caller).marked();
        if marked == 0 {
            return Err(RoomError::IncompleteSelection {
                required: 1,
                marked,
            });
        }

        graph.add_link(first, second)?;
        info!("Linked '{}' -> '{}'", first, second);
        Ok(())
    }

    /// Remove the link from `first` to `second`
    pub async fn unlink(&self, first: &str, second: &str) -> Result<(), RoomError> {
        self.graph.lock().await.remove_link(first, second)?;
        info!("Unlinked '{}' -> '{}'", first, second);
        Ok(())
    }

    /// The caller's two selected points, if both are marked
    pub fn get_points<S>(&self, selections: &S, caller: CallerId) -> Option<(Point, Point)>
    where
        S: SelectionSource + ?Sized,
    {
        selections.selection(caller).points()
    }

    pub async fn get_all_room_names(&self) -> BTreeSet<String> {
        self.graph.lock().await.all_room_names()
    }

    pub async fn get_room(&self, name: &str) -> Option<Room> {
        self.graph.lock().await.get_room(name).cloned()
    }

    pub async fn get_all_links(&self) -> Vec<Link> {
        self.graph.lock().await.all_links()
    }

    /// Every link as a display string, e.g. `a -> b`
    pub async fn get_all_link_names(&self) -> Vec<String> {
        self.get_all_links()
            .await
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Display strings of links touching `name`, or `None` if the room does not exist
    pub async fn get_all_link_names_by_room_name(&self, name: &str) -> Option<Vec<String>> {
        let links = self.graph.lock().await.links_for_room(name);
        debug!("Looked up links for '{}': {:?}", name, links.as_ref().map(Vec::len));
        links.map(|links| links.iter().map(ToString::to_string).collect())
    }
}
