//! Per-caller point selection
//!
//! The host marks points through whatever interaction it has; the room
//! system only reads them.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::room::{CallerId, Point};

/// Up to two marked points for one caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub first: Option<Point>,
    pub second: Option<Point>,
}

impl Selection {
    /// Number of marked points (0..=2)
    pub fn marked(&self) -> usize {
        usize::from(self.first.is_some()) + usize::from(self.second.is_some())
    }

    /// Both points, if both are marked
    pub fn points(&self) -> Option<(Point, Point)> {
        self.first.zip(self.second)
    }
}

/// Read access to caller selections
pub trait SelectionSource {
    fn selection(&self, caller: CallerId) -> Selection;
}

/// In-memory selection state keyed by caller
#[derive(Debug, Default)]
pub struct SelectionTracker {
    selections: RwLock<HashMap<CallerId, Selection>>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_first(&self, caller: CallerId, point: Point) {
        self.selections.write().entry(caller).or_default().first = Some(point);
    }

    pub fn mark_second(&self, caller: CallerId, point: Point) {
        self.selections.write().entry(caller).or_default().second = Some(point);
    }

    /// Forget everything marked by `caller`
    pub fn clear(&self, caller: CallerId) {
        self.selections.write().remove(&caller);
    }
}

impl SelectionSource for SelectionTracker {
    fn selection(&self, caller: CallerId) -> Selection {
        self.selections
            .read()
            .get(&caller)
            .copied()
            .unwrap_or_default()
    }
}
