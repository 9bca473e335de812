//! Catalogue error types.
//!
//! These are configuration errors: a malformed network description
//! cannot produce a usable index, so they abort the build. Ordinary
//! "not found" query outcomes are never errors; lookups return
//! `Option` instead.

/// Errors raised while populating the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    /// A route or distance entry referenced a stop that was never declared.
    #[error("unknown stop \"{0}\" referenced by the network description")]
    UnknownStop(String),

    /// A route name was declared twice.
    #[error("route \"{0}\" declared more than once")]
    DuplicateRoute(String),

    /// A route was declared with no stops.
    #[error("route \"{0}\" has an empty stop list")]
    EmptyRoute(String),
}
