//! Per-route statistics.
//!
//! Pure derivations over a resolved route: nothing here is cached or
//! stored, and the persistence layer recomputes metrics on load rather
//! than serializing them.

use std::collections::HashSet;

use super::Catalogue;
use crate::domain::StopId;

/// Statistics for one route over its full traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMetrics {
    /// Stops made over the full traversal (a there-and-back path
    /// counts the turnaround once).
    pub stop_count: usize,
    /// Distinct physical stops visited.
    pub unique_stop_count: usize,
    /// Sum of declared road distances over the traversal, in metres.
    /// A leg with no declared distance contributes zero.
    pub actual_length: f64,
    /// Sum of great-circle leg distances over the traversal, in metres.
    pub geographic_length: f64,
}

impl RouteMetrics {
    /// Ratio of road distance to straight-line distance.
    ///
    /// `None` when the geographic length is zero (all stops
    /// coincident); callers must not divide blindly.
    pub fn curvature(&self) -> Option<f64> {
        if self.geographic_length == 0.0 {
            None
        } else {
            Some(self.actual_length / self.geographic_length)
        }
    }
}

impl Catalogue {
    /// Compute metrics for a route by name.
    ///
    /// Returns `None` for an unknown route; this is an ordinary
    /// not-found outcome, not an error.
    pub fn route_metrics(&self, name: &str) -> Option<RouteMetrics> {
        let route = self.route(self.route_id(name)?);

        let mut legs: Vec<(StopId, StopId)> = route
            .traversal()
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        if route.closes_loop() {
            let first = *route.stops.first().expect("routes are never empty");
            let last = *route.stops.last().expect("routes are never empty");
            legs.push((last, first));
        }

        let mut actual = 0.0;
        let mut geographic = 0.0;
        for &(from, to) in &legs {
            actual += self.distance(from, to).unwrap_or(0.0);
            geographic += self.stop(from).coords.distance_to(self.stop(to).coords);
        }

        let unique: HashSet<StopId> = route.stops.iter().copied().collect();

        Some(RouteMetrics {
            stop_count: route.stop_count(),
            unique_stop_count: unique.len(),
            actual_length: actual,
            geographic_length: geographic,
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geo::Coordinates;
    use proptest::prelude::*;

    /// Up to eight stops spread along a line, with symmetric declared
    /// distances on every forward leg.
    fn symmetric_network() -> impl Strategy<Value = (Catalogue, usize)> {
        (2usize..8, proptest::collection::vec(1.0..10_000.0f64, 7)).prop_map(|(n, dists)| {
            let mut cat = Catalogue::new();
            for i in 0..n {
                cat.add_stop(&format!("S{i}"), Coordinates::new(0.0, 0.01 * i as f64));
            }
            for i in 0..n - 1 {
                cat.set_distance(&format!("S{i}"), &format!("S{}", i + 1), dists[i])
                    .unwrap();
            }
            (cat, n)
        })
    }

    proptest! {
        /// With symmetric distances, a there-and-back route is exactly
        /// twice its forward length.
        #[test]
        fn linear_route_is_twice_forward((mut cat, n) in symmetric_network()) {
            let names: Vec<String> = (0..n).map(|i| format!("S{i}")).collect();
            cat.add_route("p", &names, false, None).unwrap();

            let forward: f64 = (0..n - 1)
                .map(|i| cat.distance(crate::domain::StopId(i), crate::domain::StopId(i + 1)).unwrap())
                .sum();
            let m = cat.route_metrics("p").unwrap();
            prop_assert!((m.actual_length - 2.0 * forward).abs() < 1e-6);
        }

        /// Curvature, when defined, is never negative.
        #[test]
        fn curvature_non_negative((mut cat, n) in symmetric_network()) {
            let names: Vec<String> = (0..n).map(|i| format!("S{i}")).collect();
            cat.add_route("p", &names, false, None).unwrap();

            let m = cat.route_metrics("p").unwrap();
            if let Some(c) = m.curvature() {
                prop_assert!(c >= 0.0);
            }
        }
    }
}
