//! Trip-to-schedule planning engine.
//!
//! This module turns a route (distance, duration and geometry) into the
//! fuel and rest stops a driver needs and a day-by-day Hours-of-Service
//! log that fits the daily driving and on-duty limits.
//!
//! Planning runs one route fetch, then the stop planner and the schedule
//! builder, which share no state.

mod config;
mod error;
mod provider;
mod schedule;
mod stops;
mod trip;

pub use config::PlannerConfig;
pub use error::PlanError;
pub use provider::{RouteData, RouteProvider};
pub use schedule::{MAX_SCHEDULE_DAYS, build_schedule};
pub use stops::{
    MAX_STOPS, StopPlanner, UNKNOWN_LOCATION, fuel_stop_count, rest_stop_count, stop_indices,
};
pub use trip::{TripPlan, TripPlanner};
