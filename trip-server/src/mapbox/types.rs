//! Mapbox API response DTOs.
//!
//! These types map directly to the Directions v5 and Geocoding v5 JSON
//! responses. Only the fields the planner reads are declared; everything
//! else Mapbox sends is ignored.

use serde::Deserialize;

/// Response from the Directions API.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    /// `"Ok"` on success, otherwise e.g. `"NoRoute"` or `"NoSegment"`.
    pub code: Option<String>,

    /// Human-readable error detail, present on failures.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

/// A single route through all requested waypoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    /// Distance in metres.
    pub distance: f64,

    /// Estimated travel time in seconds.
    pub duration: f64,

    /// Full route geometry (requested with `geometries=geojson`).
    pub geometry: LineString,
}

/// A GeoJSON `LineString`.
#[derive(Debug, Clone, Deserialize)]
pub struct LineString {
    /// Always `"LineString"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Positions as `[longitude, latitude]`.
    pub coordinates: Vec<[f64; 2]>,
}

/// Response from the Geocoding API.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResponse {
    /// Matching places, most relevant first.
    #[serde(default)]
    pub features: Vec<GeocodingFeature>,
}

/// A place returned by the Geocoding API.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingFeature {
    /// Full place name, e.g. `"Amarillo, Texas, United States"`.
    pub place_name: String,

    /// Place centre as `[longitude, latitude]`.
    pub center: Option<[f64; 2]>,
}
