//! Transit network index and journey router.
//!
//! Ingests a description of a bus network (stops, routes, road
//! distances), derives per-route statistics and a time-weighted routing
//! graph, and answers point-to-point itinerary queries. Work is split
//! into a *build* phase that persists the network to a binary blob and
//! a *serve* phase that reloads it and answers unlimited queries.

pub mod api;
pub mod catalogue;
pub mod domain;
pub mod geo;
pub mod router;
pub mod storage;
