//! Routing provider capability.

use std::future::Future;

use crate::domain::Coordinate;

/// A route as returned by a provider, in provider units.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteData {
    /// Total route distance in metres.
    pub distance_meters: f64,

    /// Total driving time in seconds.
    pub duration_seconds: f64,

    /// Ordered route geometry.
    pub path: Vec<Coordinate>,
}

/// Trait for the routing and reverse geocoding service.
///
/// This abstraction lets the planner run against the live provider or a
/// deterministic fake. `Ok(None)` means the provider answered but had no
/// route or no matching place; `Err` means the call itself failed.
pub trait RouteProvider: Send + Sync {
    /// Error from a failed provider call.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the driving route `origin -> via -> destination`.
    fn get_route(
        &self,
        origin: Coordinate,
        via: Coordinate,
        destination: Coordinate,
    ) -> impl Future<Output = Result<Option<RouteData>, Self::Error>> + Send;

    /// Resolve a coordinate to a human-readable place name.
    fn reverse_geocode(
        &self,
        at: Coordinate,
    ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;
}
