//! Room model.
//!
//! Physical rooms are interchangeable: any free room in the pool can host
//! any in-person section. Remote sections use no room at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a placed section is held.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Room {
    /// A physical room from the pool (or named by the pinned sub-schedule).
    Physical(String),
    /// Online delivery; occupies no room.
    Remote,
}

impl Room {
    /// Creates a physical room.
    pub fn physical(id: impl Into<String>) -> Self {
        Room::Physical(id.into())
    }

    /// Physical room identifier, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Room::Physical(id) => Some(id),
            Room::Remote => None,
        }
    }

    /// Whether this is the remote sentinel.
    #[inline]
    pub fn is_remote(&self) -> bool {
        matches!(self, Room::Remote)
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Room::Physical(id) => f.write_str(id),
            Room::Remote => f.write_str("Remote"),
        }
    }
}

/// Ordered pool of interchangeable physical rooms.
///
/// Placement scans rooms in pool order, so the order is part of the
/// deterministic search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomPool {
    rooms: Vec<String>,
}

impl RoomPool {
    /// Creates a pool in the given canonical order.
    pub fn new<I, S>(rooms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rooms: rooms.into_iter().map(Into::into).collect(),
        }
    }

    /// Rooms in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.rooms.iter().map(String::as_str)
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Whether the pool contains a room.
    pub fn contains(&self, id: &str) -> bool {
        self.rooms.iter().any(|r| r == id)
    }
}

impl Default for RoomPool {
    /// Rooms `3.1` through `3.14`.
    fn default() -> Self {
        Self::new((1..=14).map(|i| format!("3.{i}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool() {
        let pool = RoomPool::default();
        assert_eq!(pool.len(), 14);
        let rooms: Vec<_> = pool.iter().collect();
        assert_eq!(rooms[0], "3.1");
        assert_eq!(rooms[1], "3.2");
        assert_eq!(rooms[13], "3.14");
        assert!(pool.contains("3.10"));
        assert!(!pool.contains("4.1"));
    }

    #[test]
    fn test_room_accessors() {
        let r = Room::physical("3.4");
        assert_eq!(r.id(), Some("3.4"));
        assert!(!r.is_remote());
        assert_eq!(r.to_string(), "3.4");

        assert_eq!(Room::Remote.id(), None);
        assert!(Room::Remote.is_remote());
    }
}
