//! Planning error types.

use chrono::NaiveDate;

use crate::domain::Coordinate;

/// Errors from trip planning.
///
/// All variants except `GeocodeLookupFailed` abort a planning call.
/// Lookup failures are logged by the stop planner and replaced with a
/// fallback place name.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// The provider returned no route, malformed route data, or failed
    #[error("route unavailable: {0}")]
    RouteUnavailable(String),

    /// The route path is too short to place stops on
    #[error("invalid route geometry: path has {points} point(s), need at least 2")]
    InvalidRouteGeometry { points: usize },

    /// Total hours reaching the scheduler are not positive
    #[error("invalid duration: {0} hours (must be positive)")]
    InvalidDuration(f64),

    /// A reverse lookup produced no place name
    #[error("geocode lookup failed at {coordinate}: {message}")]
    GeocodeLookupFailed {
        coordinate: Coordinate,
        message: String,
    },

    /// Total hours would need more daily logs than a schedule may hold
    #[error("invalid duration: {hours} hours needs more than {max_days} daily logs")]
    ScheduleTooLong { hours: f64, max_days: usize },

    /// The schedule ran past the last representable calendar date
    #[error("schedule runs past the last representable date after {0}")]
    DateOutOfRange(NaiveDate),

    /// Planner limits cannot produce a schedule
    #[error("invalid planner configuration: {0}")]
    InvalidConfig(&'static str),
}
