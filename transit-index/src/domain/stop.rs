//! Stop entity.

use std::fmt;

use crate::geo::Coordinates;

/// Index of a stop in the catalogue's stop arena.
///
/// Ids are dense and assigned in insertion order, so they double as a
/// deterministic ordering of stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(pub usize);

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stop#{}", self.0)
    }
}

/// A named geographic point on the network.
///
/// Immutable once created; the catalogue owns every `Stop` and never
/// mutates or deletes one after insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub coords: Coordinates,
}

impl Stop {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            coords: Coordinates::new(latitude, longitude),
        }
    }
}
