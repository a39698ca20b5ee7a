//! Domain types for the trip planner.
//!
//! This module contains the core value types that flow through planning:
//! coordinates, route summaries, stop plans, daily logs and trip records.
//! Types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod coordinate;
mod daily_log;
mod route;
mod stop_plan;
mod trip;

pub use coordinate::{Coordinate, CoordinateKey, InvalidCoordinate};
pub use daily_log::DailyLog;
pub use route::{
    MAX_ROUTE_METERS, MAX_ROUTE_SECONDS, METERS_PER_MILE, RouteSummary, SECONDS_PER_HOUR,
};
pub use stop_plan::StopPlan;
pub use trip::{InvalidTrip, TripId, TripRecord, TripRequest};
