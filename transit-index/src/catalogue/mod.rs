//! The network catalogue.
//!
//! Owns every stop and route, the directional road-distance table, and
//! the derived per-stop index of passing routes. Stops and routes live
//! in dense arenas; all cross-references are [`StopId`]/[`RouteId`]
//! indices resolved through the catalogue.
//!
//! The catalogue is populated once during the build phase and is
//! read-only afterwards.

mod metrics;

pub use metrics::RouteMetrics;

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{CatalogueError, Route, RouteId, Stop, StopId};
use crate::geo::Coordinates;

/// The transit network: stops, routes, and road distances.
#[derive(Debug, Default, Clone)]
pub struct Catalogue {
    stops: Vec<Stop>,
    routes: Vec<Route>,

    stop_ids: HashMap<String, StopId>,
    route_ids: HashMap<String, RouteId>,

    /// Directed road distance in metres between two stops. Not
    /// guaranteed symmetric; the reverse direction is backfilled at
    /// insertion time iff it was never declared.
    distances: HashMap<(StopId, StopId), f64>,

    /// Routes whose path visits each stop, indexed by `StopId`.
    /// Insertion order of routes, no duplicates.
    passing_routes: Vec<Vec<RouteId>>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stop. First write wins: if the name is already
    /// present the existing entry is kept and its id returned.
    pub fn add_stop(&mut self, name: &str, coords: Coordinates) -> StopId {
        if let Some(&id) = self.stop_ids.get(name) {
            return id;
        }
        let id = StopId(self.stops.len());
        self.stops.push(Stop {
            name: name.to_string(),
            coords,
        });
        self.stop_ids.insert(name.to_string(), id);
        self.passing_routes.push(Vec::new());
        self.distances.insert((id, id), 0.0);
        id
    }

    /// Register a route over already-declared stops.
    ///
    /// `last_stop` names the display destination; `None` means the
    /// final stop of the forward path.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogueError`] if the route name is a duplicate,
    /// the stop list is empty, or any referenced stop was never
    /// declared.
    pub fn add_route<S: AsRef<str>>(
        &mut self,
        name: &str,
        stop_names: &[S],
        roundtrip: bool,
        last_stop: Option<&str>,
    ) -> Result<RouteId, CatalogueError> {
        if self.route_ids.contains_key(name) {
            return Err(CatalogueError::DuplicateRoute(name.to_string()));
        }
        if stop_names.is_empty() {
            return Err(CatalogueError::EmptyRoute(name.to_string()));
        }

        let stops = stop_names
            .iter()
            .map(|n| self.resolve_stop(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let last_stop = match last_stop {
            Some(n) => self.resolve_stop(n)?,
            None => *stops.last().expect("stop list checked non-empty"),
        };

        let id = RouteId(self.routes.len());
        for &stop in &stops {
            let passing = &mut self.passing_routes[stop.0];
            if !passing.contains(&id) {
                passing.push(id);
            }
        }
        self.routes.push(Route {
            name: name.to_string(),
            stops,
            roundtrip,
            last_stop,
        });
        self.route_ids.insert(name.to_string(), id);
        debug!(route = name, roundtrip, "route registered");
        Ok(id)
    }

    /// Set the directed road distance between two stops, backfilling
    /// the reverse direction iff it has not been declared yet.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::UnknownStop`] if either name is
    /// unregistered.
    pub fn set_distance(&mut self, from: &str, to: &str, metres: f64) -> Result<(), CatalogueError> {
        let from = self.resolve_stop(from)?;
        let to = self.resolve_stop(to)?;
        self.distances.insert((from, to), metres);
        self.distances.entry((to, from)).or_insert(metres);
        Ok(())
    }

    /// Directed road distance between two stops, if declared.
    pub fn distance(&self, from: StopId, to: StopId) -> Option<f64> {
        self.distances.get(&(from, to)).copied()
    }

    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_ids.get(name).copied()
    }

    pub fn route_id(&self, name: &str) -> Option<RouteId> {
        self.route_ids.get(name).copied()
    }

    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.0]
    }

    pub fn route(&self, id: RouteId) -> &Route {
        &self.routes[id.0]
    }

    /// All stops in insertion order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// All routes in insertion order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Routes whose path visits the given stop, in route insertion
    /// order.
    pub fn routes_through(&self, stop: StopId) -> &[RouteId] {
        &self.passing_routes[stop.0]
    }

    /// Every declared distance entry, including backfilled reverse
    /// directions. Iteration order is unspecified.
    pub fn distance_entries(&self) -> impl Iterator<Item = (StopId, StopId, f64)> + '_ {
        self.distances
            .iter()
            .map(|(&(from, to), &metres)| (from, to, metres))
    }

    fn resolve_stop(&self, name: &str) -> Result<StopId, CatalogueError> {
        self.stop_id(name)
            .ok_or_else(|| CatalogueError::UnknownStop(name.to_string()))
    }
}
