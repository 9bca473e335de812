//! Routing settings.

use serde::{Deserialize, Serialize};

/// Scalar settings the routing graph is built from.
///
/// Persisted alongside the catalogue so a reloaded index rebuilds an
/// identical graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettings {
    /// Average wait at a stop before boarding, in minutes.
    pub bus_wait_time: f64,
    /// Average bus velocity in km/h.
    pub bus_velocity: f64,
}

impl RoutingSettings {
    pub fn new(bus_wait_time: f64, bus_velocity: f64) -> Self {
        Self {
            bus_wait_time,
            bus_velocity,
        }
    }

    /// Ride time in minutes for a road distance in metres.
    pub fn ride_minutes(&self, metres: f64) -> f64 {
        // m / (km/h) -> minutes
        metres / self.bus_velocity * (3.6 / 60.0)
    }
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6.0,
            bus_velocity: 40.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let s = RoutingSettings::default();
        assert_eq!(s.bus_wait_time, 6.0);
        assert_eq!(s.bus_velocity, 40.0);
    }

    #[test]
    fn ride_minutes_conversion() {
        // 40 km/h covers 1000 m in 1.5 minutes.
        let s = RoutingSettings::new(6.0, 40.0);
        assert!((s.ride_minutes(1000.0) - 1.5).abs() < 1e-12);

        // 6 km/h covers 100 m in exactly one minute.
        let s = RoutingSettings::new(5.0, 6.0);
        assert!((s.ride_minutes(100.0) - 1.0).abs() < 1e-12);
    }
}
