//! Room graph - name-keyed rooms and directed links
//!
//! Rooms are keyed by name and links reference rooms by name only, so
//! removing a room is a scan over the link set rather than pointer chasing.
//! Every mutation checks all of its preconditions before touching state.

use std::collections::{BTreeMap, BTreeSet};

use super::error::{RoomError, RoomSystemResult};
use super::name::validate_name;
use super::room::{Link, Point, Room};

/// Result of removing a room from the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDeletion {
    /// The removed room
    pub room: Room,
    /// Every link that touched the room, in link order
    pub dropped_links: Vec<Link>,
    /// True if any dropped link had no reverse counterpart before removal
    pub one_way: bool,
}

impl RoomDeletion {
    /// `OneWayLink` when an asymmetric link was dropped, otherwise `Success`
    pub fn result_code(&self) -> RoomSystemResult {
        if self.one_way {
            RoomSystemResult::OneWayLink
        } else {
            RoomSystemResult::Success
        }
    }
}

/// The authoritative store of rooms and links
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomGraph {
    rooms: BTreeMap<String, Room>,
    links: BTreeSet<Link>,
}

impl RoomGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn room_exists(&self, name: &str) -> bool {
        self.rooms.contains_key(name)
    }

    /// Insert a room; fails if the name is invalid or taken
    pub fn insert_room(&mut self, name: &str, first: Point, second: Point) -> Result<(), RoomError> {
        validate_name(name)?;
        if self.room_exists(name) {
            return Err(RoomError::RoomExists(name.to_string()));
        }
        self.rooms
            .insert(name.to_string(), Room::new(name, first, second));
        Ok(())
    }

    /// Remove a room and every link touching it
    pub fn remove_room(&mut self, name: &str) -> Result<RoomDeletion, RoomError> {
        let room = self
            .rooms
            .remove(name)
            .ok_or_else(|| RoomError::RoomNotFound(name.to_string()))?;

        let dropped_links: Vec<Link> = self
            .links
            .iter()
            .filter(|link| link.touches(name))
            .cloned()
            .collect();

        // Judged against the link set as it was before removal
        let one_way = dropped_links
            .iter()
            .any(|link| !self.links.contains(&link.reversed()));

        for link in &dropped_links {
            self.links.remove(link);
        }

        Ok(RoomDeletion {
            room,
            dropped_links,
            one_way,
        })
    }

    /// Remove every room and link
    pub fn clear_all(&mut self) {
        self.rooms.clear();
        self.links.clear();
    }

    /// Add a directed link
    pub fn add_link(&mut self, from: &str, to: &str) -> Result<(), RoomError> {
        self.check_endpoints(from, to)?;

        let link = Link::new(from, to);
        if self.links.contains(&link) {
            return Err(RoomError::LinkExists {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.links.insert(link);
        Ok(())
    }

    /// Remove a directed link; the reverse direction is left alone
    pub fn remove_link(&mut self, from: &str, to: &str) -> Result<(), RoomError> {
        self.check_endpoints(from, to)?;

        if !self.links.remove(&Link::new(from, to)) {
            return Err(RoomError::LinkAbsent {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }

    /// Existence first, then self-link
    fn check_endpoints(&self, from: &str, to: &str) -> Result<(), RoomError> {
        for name in [from, to] {
            if !self.room_exists(name) {
                return Err(RoomError::RoomNotFound(name.to_string()));
            }
        }
        if from == to {
            return Err(RoomError::SameRoom(from.to_string()));
        }
        Ok(())
    }

    pub fn get_room(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    pub fn all_room_names(&self) -> BTreeSet<String> {
        self.rooms.keys().cloned().collect()
    }

    pub fn all_links(&self) -> Vec<Link> {
        self.links.iter().cloned().collect()
    }

    /// Links with `name` as either endpoint, or `None` if the room does not exist
    pub fn links_for_room(&self, name: &str) -> Option<Vec<Link>> {
        if !self.room_exists(name) {
            return None;
        }
        Some(
            self.links
                .iter()
                .filter(|link| link.touches(name))
                .cloned()
                .collect(),
        )
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
