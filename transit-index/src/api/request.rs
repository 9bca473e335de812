//! Request DTOs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::router::RoutingSettings;

/// One declaration from the build request's `base_requests` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    /// A stop with its coordinates and declared road distances to
    /// neighbouring stops.
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        road_distances: BTreeMap<String, f64>,
    },
    /// A bus route over declared stops.
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

/// One query from a `stat_requests` array, identified by `id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    /// Route metrics by route name.
    Bus { id: i64, name: String },
    /// Routes passing through a stop.
    Stop { id: i64, name: String },
    /// Fastest itinerary between two stops.
    Route { id: i64, from: String, to: String },
}

impl StatRequest {
    pub fn id(&self) -> i64 {
        match self {
            StatRequest::Bus { id, .. }
            | StatRequest::Stop { id, .. }
            | StatRequest::Route { id, .. } => *id,
        }
    }
}

/// Where the persisted blob lives.
#[derive(Debug, Clone, Deserialize)]
pub struct SerializationSettings {
    pub file: PathBuf,
}

/// The full build-phase request.
#[derive(Debug, Deserialize)]
pub struct BuildRequest {
    pub base_requests: Vec<BaseRequest>,
    pub routing_settings: RoutingSettings,
    pub serialization_settings: SerializationSettings,
    /// Opaque to this crate; persisted as raw JSON for the external
    /// renderer.
    #[serde(default)]
    pub render_settings: Option<serde_json::Value>,
    /// Optional queries for single-process operation.
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

/// The serve-phase request: load a blob, answer queries.
#[derive(Debug, Deserialize)]
pub struct ServeRequest {
    pub serialization_settings: SerializationSettings,
    pub stat_requests: Vec<StatRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_declaration_parses() {
        let json = r#"{
            "type": "Stop",
            "name": "Rasskazovka",
            "latitude": 55.632761,
            "longitude": 37.333324,
            "road_distances": {"Marushkino": 9500}
        }"#;
        let req: BaseRequest = serde_json::from_str(json).unwrap();
        match req {
            BaseRequest::Stop {
                name,
                road_distances,
                ..
            } => {
                assert_eq!(name, "Rasskazovka");
                assert_eq!(road_distances["Marushkino"], 9500.0);
            }
            other => panic!("expected a stop, got {other:?}"),
        }
    }

    #[test]
    fn road_distances_default_to_empty() {
        let json = r#"{"type":"Stop","name":"X","latitude":0.0,"longitude":0.0}"#;
        let req: BaseRequest = serde_json::from_str(json).unwrap();
        match req {
            BaseRequest::Stop { road_distances, .. } => assert!(road_distances.is_empty()),
            other => panic!("expected a stop, got {other:?}"),
        }
    }

    #[test]
    fn bus_declaration_parses() {
        let json = r#"{"type":"Bus","name":"750","stops":["A","B"],"is_roundtrip":false}"#;
        let req: BaseRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(req, BaseRequest::Bus { ref name, .. } if name == "750"));
    }

    #[test]
    fn stat_requests_parse_by_tag() {
        let json = r#"[
            {"id": 1, "type": "Bus", "name": "750"},
            {"id": 2, "type": "Stop", "name": "A"},
            {"id": 3, "type": "Route", "from": "A", "to": "B"}
        ]"#;
        let reqs: Vec<StatRequest> = serde_json::from_str(json).unwrap();
        assert_eq!(reqs.len(), 3);
        assert_eq!(reqs[0].id(), 1);
        assert!(matches!(reqs[2], StatRequest::Route { .. }));
    }

    #[test]
    fn unknown_stat_type_is_rejected() {
        let json = r#"{"id": 1, "type": "Teleport", "name": "750"}"#;
        assert!(serde_json::from_str::<StatRequest>(json).is_err());
    }
}
