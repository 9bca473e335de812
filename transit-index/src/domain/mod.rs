//! Domain types for the transit network.
//!
//! Entities are owned by the catalogue in dense arenas; every
//! cross-reference between them is an integer id into those arenas
//! rather than a shared pointer.

mod error;
mod route;
mod stop;

pub use error::CatalogueError;
pub use route::{Route, RouteId};
pub use stop::{Stop, StopId};
