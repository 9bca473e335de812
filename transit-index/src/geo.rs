//! Great-circle geometry.
//!
//! Coordinates and the spherical distance between them. Geographic
//! distance is only used as a metric for route statistics; routing
//! weights always come from declared road distances.

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Coordinates closer than this (in degrees) are treated as coincident,
/// which keeps `acos` away from arguments fractionally above 1.
const COORD_EPSILON: f64 = 1e-4;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to another point, in metres.
    ///
    /// Returns exactly `0.0` for coincident points rather than relying
    /// on floating-point cancellation.
    pub fn distance_to(&self, other: Coordinates) -> f64 {
        if (self.lat - other.lat).abs() < COORD_EPSILON
            && (self.lng - other.lng).abs() < COORD_EPSILON
        {
            return 0.0;
        }

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lng = (self.lng - other.lng).abs().to_radians();

        (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * delta_lng.cos()).acos()
            * EARTH_RADIUS_M
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coords() -> impl Strategy<Value = Coordinates> {
        (-85.0..85.0f64, -180.0..180.0f64).prop_map(|(lat, lng)| Coordinates::new(lat, lng))
    }

    proptest! {
        /// Distance is symmetric.
        #[test]
        fn symmetric(a in coords(), b in coords()) {
            let ab = a.distance_to(b);
            let ba = b.distance_to(a);
            prop_assert!((ab - ba).abs() < 1e-6);
        }

        /// Distance is non-negative and finite.
        #[test]
        fn non_negative_and_finite(a in coords(), b in coords()) {
            let d = a.distance_to(b);
            prop_assert!(d >= 0.0);
            prop_assert!(d.is_finite());
        }

        /// No point on Earth is further away than half the circumference.
        #[test]
        fn bounded_by_half_circumference(a in coords(), b in coords()) {
            let d = a.distance_to(b);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_M + 1.0);
        }
    }
}
