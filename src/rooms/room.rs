//! Room value types

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Integer block position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise minimum of two points
    pub fn min(self, other: Point) -> Point {
        Point::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum of two points
    pub fn max(self, other: Point) -> Point {
        Point::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A named axis-aligned volume
///
/// The two corners are kept exactly as they were selected. Use
/// [`Room::min_corner`] and [`Room::max_corner`] for the ordered bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique, case-sensitive room name
    pub name: String,
    /// First selected corner
    pub first_point: Point,
    /// Second selected corner
    pub second_point: Point,
}

impl Room {
    pub fn new(name: impl Into<String>, first_point: Point, second_point: Point) -> Self {
        Self {
            name: name.into(),
            first_point,
            second_point,
        }
    }

    pub fn min_corner(&self) -> Point {
        self.first_point.min(self.second_point)
    }

    pub fn max_corner(&self) -> Point {
        self.first_point.max(self.second_point)
    }
}

/// A directed edge between two room names
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Link {
    pub from: String,
    pub to: String,
}

impl Link {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The same edge pointing the other way
    pub fn reversed(&self) -> Link {
        Link::new(self.to.clone(), self.from.clone())
    }

    /// True if `name` is either endpoint
    pub fn touches(&self, name: &str) -> bool {
        self.from == name || self.to == name
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Opaque, stable identity of whoever issues commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerId(pub Uuid);

impl CallerId {
    /// Create a fresh random caller identity
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for CallerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_bounds_are_derived() {
        let room = Room::new("hall", Point::new(5, -2, 9), Point::new(1, 4, 3));
        assert_eq!(room.min_corner(), Point::new(1, -2, 3));
        assert_eq!(room.max_corner(), Point::new(5, 4, 9));
        // Stored corners keep their selection order
        assert_eq!(room.first_point, Point::new(5, -2, 9));
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(1, -2, 3).to_string(), "(1, -2, 3)");
    }

    #[test]
    fn test_link_helpers() {
        let link = Link::new("a", "b");
        assert_eq!(link.reversed(), Link::new("b", "a"));
        assert!(link.touches("a"));
        assert!(link.touches("b"));
        assert!(!link.touches("c"));
        assert_eq!(link.to_string(), "a -> b");
    }
}
