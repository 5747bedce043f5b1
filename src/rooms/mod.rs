//! Room system - named volumes, directed links, and per-caller selections

mod error;
mod graph;
mod name;
mod room;
mod selection;
mod system;

pub use error::{RoomError, RoomSystemResult};
pub use graph::{RoomDeletion, RoomGraph};
pub use name::{validate_name, NameError, MAX_NAME_LEN};
pub use room::{CallerId, Link, Point, Room};
pub use selection::{Selection, SelectionSource, SelectionTracker};
pub use system::RoomSystem;
