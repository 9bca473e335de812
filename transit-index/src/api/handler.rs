//! Request execution.
//!
//! Drives the two phases: `make_base` ingests a build request,
//! populates the catalogue, builds the router, and persists the blob;
//! `process_requests` restores the blob and answers a batch of
//! queries. Query answering itself is shared between the two paths so
//! single-process operation behaves identically to build-then-serve.

use tracing::{info, warn};

use crate::catalogue::Catalogue;
use crate::domain::CatalogueError;
use crate::geo::Coordinates;
use crate::router::TransportRouter;
use crate::storage::{self, StorageError};

use super::request::{BaseRequest, BuildRequest, ServeRequest, StatRequest};
use super::response::StatResponse;

/// Errors surfacing from request processing. All are configuration
/// errors in the taxonomy sense: malformed input, an unresolvable
/// network, or a broken blob. Not-found query outcomes never appear
/// here; they are answered in-band.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid network description: {0}")]
    Catalogue(#[from] CatalogueError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Execute a build request: ingest, persist, and (for single-process
/// use) answer any queries bundled with it.
///
/// Returns the JSON response array, or `None` when the request
/// carried no queries.
pub fn make_base(input: &str) -> Result<Option<String>, ApiError> {
    let request: BuildRequest = serde_json::from_str(input)?;

    let catalogue = build_catalogue(&request.base_requests)?;
    let router = TransportRouter::build(&catalogue, request.routing_settings);
    info!(
        stops = catalogue.stops().len(),
        routes = catalogue.routes().len(),
        "network ingested"
    );

    let render_settings = match &request.render_settings {
        Some(value) => Some(serde_json::to_string(value)?),
        None => None,
    };
    storage::save(
        &request.serialization_settings.file,
        &catalogue,
        request.routing_settings,
        render_settings.as_deref(),
    )?;

    if request.stat_requests.is_empty() {
        return Ok(None);
    }
    let responses = answer_requests(&catalogue, &router, &request.stat_requests);
    Ok(Some(serde_json::to_string(&responses)?))
}

/// Execute a serve request: restore the blob and answer the batch.
pub fn process_requests(input: &str) -> Result<String, ApiError> {
    let request: ServeRequest = serde_json::from_str(input)?;
    let restored = storage::load(&request.serialization_settings.file)?;
    let responses = answer_requests(
        &restored.catalogue,
        &restored.router,
        &request.stat_requests,
    );
    Ok(serde_json::to_string(&responses)?)
}

/// Populate a catalogue from the declaration list.
///
/// Two passes: every stop must be registered (with its distances,
/// including reverse backfill) before any route is resolved.
fn build_catalogue(declarations: &[BaseRequest]) -> Result<Catalogue, CatalogueError> {
    let mut catalogue = Catalogue::new();

    for declaration in declarations {
        if let BaseRequest::Stop {
            name,
            latitude,
            longitude,
            ..
        } = declaration
        {
            catalogue.add_stop(name, Coordinates::new(*latitude, *longitude));
        }
    }

    for declaration in declarations {
        match declaration {
            BaseRequest::Stop {
                name,
                road_distances,
                ..
            } => {
                for (other, metres) in road_distances {
                    catalogue.set_distance(name, other, *metres)?;
                }
            }
            BaseRequest::Bus {
                name,
                stops,
                is_roundtrip,
            } => {
                catalogue.add_route(name, stops, *is_roundtrip, None)?;
            }
        }
    }

    Ok(catalogue)
}

/// Answer a batch of queries. Responses come back in request order,
/// and a not-found outcome never aborts the rest of the batch.
pub fn answer_requests(
    catalogue: &Catalogue,
    router: &TransportRouter,
    requests: &[StatRequest],
) -> Vec<StatResponse> {
    requests
        .iter()
        .map(|request| answer_one(catalogue, router, request))
        .collect()
}

fn answer_one(
    catalogue: &Catalogue,
    router: &TransportRouter,
    request: &StatRequest,
) -> StatResponse {
    match request {
        StatRequest::Bus { id, name } => match catalogue.route_metrics(name) {
            Some(metrics) => {
                let curvature = metrics.curvature().unwrap_or_else(|| {
                    warn!(route = %name, "curvature undefined: zero geographic length");
                    0.0
                });
                StatResponse::Bus {
                    request_id: *id,
                    curvature,
                    route_length: metrics.actual_length,
                    stop_count: metrics.stop_count,
                    unique_stop_count: metrics.unique_stop_count,
                }
            }
            None => StatResponse::not_found(*id),
        },
        StatRequest::Stop { id, name } => match catalogue.stop_id(name) {
            Some(stop) => {
                let mut buses: Vec<String> = catalogue
                    .routes_through(stop)
                    .iter()
                    .map(|&route| catalogue.route(route).name.clone())
                    .collect();
                buses.sort();
                StatResponse::Stop {
                    request_id: *id,
                    buses,
                }
            }
            None => StatResponse::not_found(*id),
        },
        StatRequest::Route { id, from, to } => match router.route(catalogue, from, to) {
            Some(itinerary) => StatResponse::route(*id, itinerary),
            None => StatResponse::not_found(*id),
        },
    }
}
