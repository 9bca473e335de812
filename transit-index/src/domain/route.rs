//! Route entity.

use super::StopId;

/// Index of a route in the catalogue's route arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(pub usize);

/// A named ordered sequence of stops.
///
/// The stored path is the declared forward sequence. A roundtrip route
/// forms a loop; a non-roundtrip route is a there-and-back path whose
/// full traversal is the forward sequence followed by its mirror,
/// without duplicating the turnaround stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub name: String,
    /// Forward path through the network. Never empty.
    pub stops: Vec<StopId>,
    pub roundtrip: bool,
    /// Final destination for display. Equal to the forward path's last
    /// stop unless the input declared otherwise.
    pub last_stop: StopId,
}

impl Route {
    /// The full traversal a vehicle makes: the forward path, plus the
    /// mirrored return leg for non-roundtrip routes.
    ///
    /// Does not include the roundtrip closing leg back to the first
    /// stop; callers that need it (length computation, graph building)
    /// use [`Route::closes_loop`].
    pub fn traversal(&self) -> Vec<StopId> {
        if self.roundtrip {
            return self.stops.clone();
        }
        let mut full = self.stops.clone();
        full.extend(self.stops.iter().rev().skip(1));
        full
    }

    /// Whether the traversal implicitly returns from the last stop of
    /// the forward path to the first.
    pub fn closes_loop(&self) -> bool {
        self.roundtrip && self.stops.len() > 1 && self.stops.first() != self.stops.last()
    }

    /// Number of stops made over the full traversal.
    pub fn stop_count(&self) -> usize {
        if self.roundtrip {
            self.stops.len()
        } else {
            2 * self.stops.len() - 1
        }
    }
}
