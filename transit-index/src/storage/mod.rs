//! Persistence codec.
//!
//! Serializes the catalogue and build settings as one bincode blob,
//! the boundary between the build and serve phases. The routing graph
//! is never stored: loading rebuilds it deterministically from the
//! restored catalogue, so a reloaded index always agrees with the
//! declared settings.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalogue::Catalogue;
use crate::domain::CatalogueError;
use crate::geo::Coordinates;
use crate::router::{RoutingSettings, TransportRouter};

/// Errors from blob read/write.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("blob I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("blob encoding failed: {0}")]
    Codec(#[from] bincode::Error),

    /// A blob that restores into an inconsistent network. Only
    /// possible with a hand-edited or truncated file.
    #[error("restored network is inconsistent: {0}")]
    Corrupt(#[from] CatalogueError),
}

#[derive(Debug, Serialize, Deserialize)]
struct StopRecord {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct RouteRecord {
    name: String,
    stops: Vec<String>,
    roundtrip: bool,
    last_stop: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct DistanceRecord {
    from: String,
    to: String,
    metres: f64,
}

/// Everything the serve phase needs, in declaration form. Derived
/// state (metrics, graph, shortest paths) is recomputed on load.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    stops: Vec<StopRecord>,
    routes: Vec<RouteRecord>,
    distances: Vec<DistanceRecord>,
    settings: RoutingSettings,
    /// Render configuration, opaque to this crate: raw JSON text
    /// carried through unchanged for the external renderer.
    render_settings: Option<String>,
}

/// An index restored from a blob, rebuilt and ready to query.
#[derive(Debug)]
pub struct RestoredIndex {
    pub catalogue: Catalogue,
    pub router: TransportRouter,
    pub render_settings: Option<String>,
}

/// Write the catalogue and settings to `path` as one bincode blob.
pub fn save(
    path: &Path,
    catalogue: &Catalogue,
    settings: RoutingSettings,
    render_settings: Option<&str>,
) -> Result<(), StorageError> {
    let snapshot = snapshot_of(catalogue, settings, render_settings);
    let file = File::create(path)?;
    bincode::serialize_into(BufWriter::new(file), &snapshot)?;
    info!(
        path = %path.display(),
        stops = snapshot.stops.len(),
        routes = snapshot.routes.len(),
        "index persisted"
    );
    Ok(())
}

/// Read a blob and rebuild the full serving index from it.
///
/// Restoration order matters: stops first, then distances, then
/// routes (route resolution needs the stops), then the router is
/// rebuilt against the restored settings.
pub fn load(path: &Path) -> Result<RestoredIndex, StorageError> {
    let file = File::open(path)?;
    let snapshot: Snapshot = bincode::deserialize_from(BufReader::new(file))?;

    let mut catalogue = Catalogue::new();
    for stop in &snapshot.stops {
        catalogue.add_stop(&stop.name, Coordinates::new(stop.latitude, stop.longitude));
    }
    for d in &snapshot.distances {
        catalogue.set_distance(&d.from, &d.to, d.metres)?;
    }
    for route in &snapshot.routes {
        catalogue.add_route(
            &route.name,
            &route.stops,
            route.roundtrip,
            Some(&route.last_stop),
        )?;
    }

    let router = TransportRouter::build(&catalogue, snapshot.settings);
    info!(
        path = %path.display(),
        stops = catalogue.stops().len(),
        routes = catalogue.routes().len(),
        "index restored"
    );

    Ok(RestoredIndex {
        catalogue,
        router,
        render_settings: snapshot.render_settings,
    })
}

fn snapshot_of(
    catalogue: &Catalogue,
    settings: RoutingSettings,
    render_settings: Option<&str>,
) -> Snapshot {
    let stops = catalogue
        .stops()
        .iter()
        .map(|s| StopRecord {
            name: s.name.clone(),
            latitude: s.coords.lat,
            longitude: s.coords.lng,
        })
        .collect();

    let routes = catalogue
        .routes()
        .iter()
        .map(|r| RouteRecord {
            name: r.name.clone(),
            stops: r
                .stops
                .iter()
                .map(|&id| catalogue.stop(id).name.clone())
                .collect(),
            roundtrip: r.roundtrip,
            last_stop: catalogue.stop(r.last_stop).name.clone(),
        })
        .collect();

    // Zero-length self-distances are the insertion seed and are
    // recreated on load; a declared self-distance is real network data
    // (a route can stop twice in a row) and must survive the blob.
    let mut distances: Vec<DistanceRecord> = catalogue
        .distance_entries()
        .filter(|&(from, to, metres)| from != to || metres != 0.0)
        .map(|(from, to, metres)| DistanceRecord {
            from: catalogue.stop(from).name.clone(),
            to: catalogue.stop(to).name.clone(),
            metres,
        })
        .collect();
    // Deterministic blob bytes for identical catalogues.
    distances.sort_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));

    Snapshot {
        stops,
        routes,
        distances,
        settings,
        render_settings: render_settings.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_catalogue() -> Catalogue {
        let mut cat = Catalogue::new();
        cat.add_stop("A", Coordinates::new(0.0, 0.0));
        cat.add_stop("B", Coordinates::new(0.0, 0.01));
        cat.add_stop("C", Coordinates::new(0.0, 0.02));
        cat.set_distance("A", "B", 100.0).unwrap();
        cat.set_distance("B", "C", 150.0).unwrap();
        cat.set_distance("B", "A", 90.0).unwrap();
        cat.add_route("1", &["A", "B", "C"], true, None).unwrap();
        cat.add_route("2", &["A", "B"], false, None).unwrap();
        cat
    }

    #[test]
    fn round_trip_restores_the_network() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transit.db");
        let cat = sample_catalogue();
        let settings = RoutingSettings::new(5.0, 6.0);

        save(&path, &cat, settings, None).unwrap();
        let restored = load(&path).unwrap();

        assert_eq!(restored.catalogue.stops(), cat.stops());
        assert_eq!(restored.catalogue.routes(), cat.routes());
        assert_eq!(restored.router.settings(), settings);

        let a = restored.catalogue.stop_id("A").unwrap();
        let b = restored.catalogue.stop_id("B").unwrap();
        assert_eq!(restored.catalogue.distance(a, b), Some(100.0));
        assert_eq!(restored.catalogue.distance(b, a), Some(90.0));
    }

    #[test]
    fn restored_index_answers_queries_identically() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transit.db");
        let cat = sample_catalogue();
        let settings = RoutingSettings::new(5.0, 6.0);
        let original = TransportRouter::build(&cat, settings);

        save(&path, &cat, settings, None).unwrap();
        let restored = load(&path).unwrap();

        for from in ["A", "B", "C"] {
            for to in ["A", "B", "C"] {
                assert_eq!(
                    original.route(&cat, from, to),
                    restored.router.route(&restored.catalogue, from, to),
                    "route {from} -> {to} diverged after reload"
                );
            }
        }
        assert_eq!(
            cat.route_metrics("2"),
            restored.catalogue.route_metrics("2")
        );
    }

    #[test]
    fn declared_self_distance_survives_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transit.db");
        let mut cat = Catalogue::new();
        cat.add_stop("T", Coordinates::new(0.0, 0.0));
        cat.add_stop("M", Coordinates::new(0.0, 0.01));
        cat.add_stop("R", Coordinates::new(0.0, 0.02));
        cat.set_distance("T", "M", 100.0).unwrap();
        cat.set_distance("M", "M", 100.0).unwrap();
        cat.set_distance("M", "R", 100.0).unwrap();
        cat.add_route("750", &["T", "M", "M", "R"], false, None).unwrap();
        let settings = RoutingSettings::new(5.0, 6.0);
        let original = TransportRouter::build(&cat, settings);

        save(&path, &cat, settings, None).unwrap();
        let restored = load(&path).unwrap();

        let m = restored.catalogue.stop_id("M").unwrap();
        assert_eq!(restored.catalogue.distance(m, m), Some(100.0));
        assert_eq!(
            restored.catalogue.route_metrics("750"),
            cat.route_metrics("750")
        );
        assert_eq!(
            restored.router.route(&restored.catalogue, "T", "R"),
            original.route(&cat, "T", "R")
        );
    }

    #[test]
    fn render_settings_pass_through_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transit.db");
        let render = r#"{"width":600.0,"color_palette":["green"]}"#;

        save(
            &path,
            &sample_catalogue(),
            RoutingSettings::default(),
            Some(render),
        )
        .unwrap();
        let restored = load(&path).unwrap();
        assert_eq!(restored.render_settings.as_deref(), Some(render));
    }

    #[test]
    fn saving_twice_produces_identical_blobs() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a.db");
        let second = dir.path().join("b.db");
        let cat = sample_catalogue();

        save(&first, &cat, RoutingSettings::default(), None).unwrap();
        save(&second, &cat, RoutingSettings::default(), None).unwrap();
        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
    }

    #[test]
    fn missing_blob_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = load(&dir.path().join("absent.db")).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn truncated_blob_is_a_codec_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transit.db");
        save(&path, &sample_catalogue(), RoutingSettings::default(), None).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, StorageError::Codec(_)));
    }
}
