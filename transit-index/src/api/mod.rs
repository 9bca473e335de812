//! External request/response surface.
//!
//! JSON requests and responses are tagged sum types matched
//! exhaustively; there is no runtime type inspection anywhere
//! downstream of deserialization.

mod handler;
mod request;
mod response;

pub use handler::{ApiError, answer_requests, make_base, process_requests};
pub use request::{BaseRequest, BuildRequest, SerializationSettings, ServeRequest, StatRequest};
pub use response::{ItineraryItemDto, StatResponse};
