//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, DailyLog, TripId, TripRecord, TripRequest};
use crate::planner::TripPlan;
use crate::store::StoredTrip;

/// Format used for log dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Cycle hours as sent by clients: a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CycleHours {
    Number(f64),
    Text(String),
}

impl CycleHours {
    fn value(&self) -> Option<f64> {
        match self {
            CycleHours::Number(n) => Some(*n),
            CycleHours::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Request to create (plan) a trip.
#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    /// Where the driver is now, as `"lng,lat"`
    pub current_location: String,

    /// Pickup point, as `"lng,lat"`
    pub pickup_location: String,

    /// Drop-off point, as `"lng,lat"`
    pub dropoff_location: String,

    /// Duty hours already used in the current cycle
    pub cycle_hours: CycleHours,
}

impl CreateTripRequest {
    /// Validate into a domain request.
    ///
    /// The error message names the offending field.
    pub fn to_trip_request(&self) -> Result<TripRequest, String> {
        let current = parse_location("current_location", &self.current_location)?;
        let pickup = parse_location("pickup_location", &self.pickup_location)?;
        let dropoff = parse_location("dropoff_location", &self.dropoff_location)?;

        let cycle_hours = self
            .cycle_hours
            .value()
            .ok_or_else(|| "cycle_hours must be a number".to_string())?;

        TripRequest::new(current, pickup, dropoff, cycle_hours).map_err(|e| e.to_string())
    }
}

fn parse_location(field: &str, value: &str) -> Result<Coordinate, String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    Coordinate::parse(value).map_err(|e| format!("{field}: {e}"))
}

/// A stored trip.
#[derive(Debug, Serialize)]
pub struct TripResult {
    pub id: u64,
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub cycle_hours: f64,

    /// RFC 3339 creation time
    pub created_at: String,
}

/// Route distance and duration.
#[derive(Debug, Serialize)]
pub struct RouteInfo {
    /// e.g. `"1500.00 miles"`
    pub distance: String,

    /// e.g. `"10.00 hours"`, including the pickup/drop-off allowance
    pub duration: String,

    pub total_days: u32,
}

/// Fuel and rest stops along the route.
#[derive(Debug, Serialize)]
pub struct StopsResult {
    pub fuel_stops: usize,
    pub rest_stops: usize,
    pub fuel_stop_locations: Vec<String>,
    pub rest_stop_locations: Vec<String>,
}

/// One day of the duty log.
#[derive(Debug, Serialize)]
pub struct LogResult {
    /// Owning trip id
    pub trip: u64,

    /// `YYYY-MM-DD`
    pub date: String,

    pub driving_hours: f64,
    pub on_duty_hours: f64,
    pub off_duty_hours: f64,
    pub sleeper_hours: f64,
}

/// Route path as a GeoJSON `LineString`.
#[derive(Debug, Serialize)]
pub struct RouteGeometry {
    #[serde(rename = "type")]
    pub kind: &'static str,

    /// Positions as `[longitude, latitude]`
    pub coordinates: Vec<[f64; 2]>,
}

/// Response for trip creation.
#[derive(Debug, Serialize)]
pub struct TripPlanResponse {
    pub trip: TripResult,
    pub route_info: RouteInfo,
    pub stops: StopsResult,
    pub logs: Vec<LogResult>,
    pub route_geometry: RouteGeometry,
}

/// A stored trip with its logs.
#[derive(Debug, Serialize)]
pub struct TripDetailResponse {
    pub trip: TripResult,
    pub logs: Vec<LogResult>,
}

/// Response for trip listing.
#[derive(Debug, Serialize)]
pub struct TripListResponse {
    /// Trips, newest first
    pub trips: Vec<TripResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl TripResult {
    /// Create from a stored trip record.
    pub fn from_record(record: &TripRecord) -> Self {
        Self {
            id: record.id.0,
            current_location: record.current_location.to_string(),
            pickup_location: record.pickup_location.to_string(),
            dropoff_location: record.dropoff_location.to_string(),
            cycle_hours: record.cycle_hours,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

impl LogResult {
    /// Create from a daily log belonging to `trip`.
    pub fn from_log(trip: TripId, log: &DailyLog) -> Self {
        Self {
            trip: trip.0,
            date: log.date.format(DATE_FORMAT).to_string(),
            driving_hours: log.driving_hours,
            on_duty_hours: log.on_duty_hours,
            off_duty_hours: log.off_duty_hours,
            sleeper_hours: log.sleeper_hours,
        }
    }
}

impl RouteGeometry {
    /// Create from an ordered route path.
    pub fn from_path(path: &[Coordinate]) -> Self {
        Self {
            kind: "LineString",
            coordinates: path.iter().map(Coordinate::to_lng_lat).collect(),
        }
    }
}

impl TripPlanResponse {
    /// Create from a plan and the trip record it was stored under.
    pub fn from_plan(record: &TripRecord, plan: &TripPlan) -> Self {
        Self {
            trip: TripResult::from_record(record),
            route_info: RouteInfo {
                distance: plan.distance_display(),
                duration: plan.duration_display(),
                total_days: plan.total_days,
            },
            stops: StopsResult {
                fuel_stops: plan.stops.fuel_stop_count(),
                rest_stops: plan.stops.rest_stop_count(),
                fuel_stop_locations: plan.stops.fuel_stop_places.clone(),
                rest_stop_locations: plan.stops.rest_stop_places.clone(),
            },
            logs: plan
                .logs
                .iter()
                .map(|log| LogResult::from_log(record.id, log))
                .collect(),
            route_geometry: RouteGeometry::from_path(plan.route.path()),
        }
    }
}

impl TripDetailResponse {
    /// Create from a stored trip.
    pub fn from_stored(stored: &StoredTrip) -> Self {
        Self {
            trip: TripResult::from_record(&stored.record),
            logs: stored
                .logs
                .iter()
                .map(|log| LogResult::from_log(stored.record.id, log))
                .collect(),
        }
    }
}
