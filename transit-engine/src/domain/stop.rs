//! Stop types.

use super::Coord;

/// Index of a stop in the registry's arena.
///
/// Stop lookups by name happen once, at catalog build time; everything
/// after that works in terms of these indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(pub usize);

/// A named, geolocated point where a route may be boarded or alighted.
#[derive(Debug, Clone)]
pub struct Stop {
    /// Display name, unique within the registry (case-insensitively).
    pub name: String,

    /// Location of the stop.
    pub coord: Coord,
}

impl Stop {
    /// Create a new stop.
    pub fn new(name: impl Into<String>, coord: Coord) -> Self {
        Self {
            name: name.into(),
            coord,
        }
    }
}
