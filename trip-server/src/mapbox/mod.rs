//! Mapbox routing and geocoding client.
//!
//! This module provides the live [`RouteProvider`](crate::planner::RouteProvider)
//! backed by the Mapbox Directions and Geocoding APIs, and a fixture
//! provider that serves canned data for tests and offline development.
//!
//! Key characteristics of Mapbox:
//! - Coordinates are always `longitude,latitude`
//! - Directions distances are metres and durations are seconds
//! - The access token travels as a query parameter, not a header

mod client;
mod convert;
mod error;
mod fixture;
mod types;

pub use client::{MapboxClient, MapboxConfig};
pub use convert::{place_from_geocoding, route_from_directions};
pub use error::MapboxError;
pub use fixture::FixtureRouteProvider;
pub use types::{DirectionsResponse, DirectionsRoute, GeocodingFeature, GeocodingResponse, LineString};
