//! Route summary in planning units.

use super::Coordinate;

/// Metres in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.34;

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Longest distance accepted from a provider: 100 000 km.
pub const MAX_ROUTE_METERS: f64 = 1.0e8;

/// Longest driving time accepted from a provider: about 116 days.
pub const MAX_ROUTE_SECONDS: f64 = 1.0e7;

/// A fetched route, converted to miles and hours.
///
/// Distance and duration are finite, non-negative and no larger than
/// [`MAX_ROUTE_METERS`] and [`MAX_ROUTE_SECONDS`], and the path holds at
/// least one coordinate. The summary is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    total_distance_miles: f64,
    total_duration_hours: f64,
    path: Vec<Coordinate>,
}

impl RouteSummary {
    /// Build a summary from provider units (metres and seconds).
    ///
    /// Returns `None` if either measure is negative, not finite or beyond
    /// the accepted maximum, or if the path is empty.
    pub fn from_provider_units(
        distance_meters: f64,
        duration_seconds: f64,
        path: Vec<Coordinate>,
    ) -> Option<Self> {
        let valid = |v: f64, max: f64| v.is_finite() && (0.0..=max).contains(&v);
        if !valid(distance_meters, MAX_ROUTE_METERS)
            || !valid(duration_seconds, MAX_ROUTE_SECONDS)
            || path.is_empty()
        {
            return None;
        }

        Some(RouteSummary {
            total_distance_miles: distance_meters / METERS_PER_MILE,
            total_duration_hours: duration_seconds / SECONDS_PER_HOUR,
            path,
        })
    }

    pub fn total_distance_miles(&self) -> f64 {
        self.total_distance_miles
    }

    /// Raw driving time, before any handling allowance.
    pub fn total_duration_hours(&self) -> f64 {
        self.total_duration_hours
    }

    /// Ordered route geometry, origin first.
    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }
}
