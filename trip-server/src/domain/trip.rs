//! Trip requests and stored trip records.

use std::fmt;

use chrono::{DateTime, Utc};

use super::Coordinate;

/// Error returned when a trip request fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid trip: {0}")]
pub struct InvalidTrip(&'static str);

/// Identifier of a stored trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TripId(pub u64);

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated request to plan a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    /// Where the driver is now.
    pub current_location: Coordinate,

    /// Where the load is picked up.
    pub pickup_location: Coordinate,

    /// Where the load is delivered.
    pub dropoff_location: Coordinate,

    /// Duty hours already used in the driver's current cycle.
    pub cycle_hours: f64,
}

impl TripRequest {
    /// Create a request, checking `cycle_hours` is a finite, non-negative number.
    pub fn new(
        current_location: Coordinate,
        pickup_location: Coordinate,
        dropoff_location: Coordinate,
        cycle_hours: f64,
    ) -> Result<Self, InvalidTrip> {
        if !cycle_hours.is_finite() {
            return Err(InvalidTrip("cycle hours must be a finite number"));
        }
        if cycle_hours < 0.0 {
            return Err(InvalidTrip("cycle hours must not be negative"));
        }

        Ok(Self {
            current_location,
            pickup_location,
            dropoff_location,
            cycle_hours,
        })
    }
}

/// A trip as held by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub id: TripId,
    pub current_location: Coordinate,
    pub pickup_location: Coordinate,
    pub dropoff_location: Coordinate,
    pub cycle_hours: f64,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for TripRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trip {} from {} to {}",
            self.id, self.pickup_location, self.dropoff_location
        )
    }
}
