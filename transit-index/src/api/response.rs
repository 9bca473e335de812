//! Response DTOs.

use serde::Serialize;

use crate::router::{Itinerary, ItineraryItem};

/// One step of an itinerary, in wire form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ItineraryItemDto {
    Wait { stop_name: String, time: f64 },
    Bus {
        bus: String,
        span_count: usize,
        time: f64,
    },
}

impl From<ItineraryItem> for ItineraryItemDto {
    fn from(item: ItineraryItem) -> Self {
        match item {
            ItineraryItem::Wait { stop, minutes } => ItineraryItemDto::Wait {
                stop_name: stop,
                time: minutes,
            },
            ItineraryItem::Bus {
                route,
                span,
                minutes,
            } => ItineraryItemDto::Bus {
                bus: route,
                span_count: span,
                time: minutes,
            },
        }
    }
}

/// Answer to one stat request. Serialized untagged: the payload shape
/// identifies the query kind, and every variant carries `request_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatResponse {
    Bus {
        request_id: i64,
        curvature: f64,
        route_length: f64,
        stop_count: usize,
        unique_stop_count: usize,
    },
    Stop {
        request_id: i64,
        buses: Vec<String>,
    },
    Route {
        request_id: i64,
        total_time: f64,
        items: Vec<ItineraryItemDto>,
    },
    NotFound {
        request_id: i64,
        error_message: String,
    },
}

impl StatResponse {
    /// The standard "not found" answer for a well-formed query whose
    /// target does not exist.
    pub fn not_found(request_id: i64) -> Self {
        StatResponse::NotFound {
            request_id,
            error_message: "not found".to_string(),
        }
    }

    pub fn route(request_id: i64, itinerary: Itinerary) -> Self {
        StatResponse::Route {
            request_id,
            total_time: itinerary.total_minutes,
            items: itinerary.items.into_iter().map(Into::into).collect(),
        }
    }
}
