//! Trip planning: route fetch, stops and daily logs.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::{DailyLog, RouteSummary, StopPlan, TripRequest};

use super::config::PlannerConfig;
use super::error::PlanError;
use super::provider::{RouteData, RouteProvider};
use super::schedule::build_schedule;
use super::stops::StopPlanner;

/// The assembled plan for one trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlan {
    /// The fetched route in miles and hours.
    pub route: RouteSummary,

    /// Route duration plus the pickup/drop-off allowance.
    pub total_hours: f64,

    /// `ceil(total_hours / 24)`, for display only.
    pub total_days: u32,

    /// Fuel and rest stops.
    pub stops: StopPlan,

    /// Daily logs in date order.
    pub logs: Vec<DailyLog>,
}

impl TripPlan {
    pub fn total_miles(&self) -> f64 {
        self.route.total_distance_miles()
    }

    /// Distance for display, e.g. `"1234.57 miles"`.
    pub fn distance_display(&self) -> String {
        format!("{:.2} miles", self.total_miles())
    }

    /// Duration for display, e.g. `"21.50 hours"`.
    pub fn duration_display(&self) -> String {
        format!("{:.2} hours", self.total_hours)
    }
}

/// Plans trips against a route provider.
pub struct TripPlanner<'a, P: RouteProvider> {
    provider: &'a P,
    config: &'a PlannerConfig,
}

impl<'a, P: RouteProvider> TripPlanner<'a, P> {
    /// Create a new planner.
    pub fn new(provider: &'a P, config: &'a PlannerConfig) -> Self {
        Self { provider, config }
    }

    /// Plan a trip, with the first log dated `start_date`.
    ///
    /// Fetches the route once, then derives the stops and the daily logs.
    /// Any route, geometry or duration failure aborts the whole plan.
    pub async fn plan_trip(
        &self,
        request: &TripRequest,
        start_date: NaiveDate,
    ) -> Result<TripPlan, PlanError> {
        self.config.validate()?;

        let data = self
            .provider
            .get_route(
                request.current_location,
                request.pickup_location,
                request.dropoff_location,
            )
            .await
            .map_err(|e| PlanError::RouteUnavailable(e.to_string()))?
            .ok_or_else(|| PlanError::RouteUnavailable("provider returned no route".to_string()))?;

        let route = summarize(data)?;
        let total_miles = route.total_distance_miles();
        let total_hours = route.total_duration_hours() + self.config.handling_allowance_hours;
        let total_days = (total_hours / 24.0).ceil() as u32;

        debug!(total_miles, total_hours, total_days, "Route fetched");

        let logs = build_schedule(total_hours, start_date, self.config)?;
        let stops = StopPlanner::new(self.provider, self.config)
            .plan_stops(total_miles, total_hours, route.path())
            .await?;

        info!(
            total_miles,
            total_hours,
            days = logs.len(),
            fuel_stops = stops.fuel_stop_count(),
            rest_stops = stops.rest_stop_count(),
            "Trip planned"
        );

        Ok(TripPlan {
            route,
            total_hours,
            total_days,
            stops,
            logs,
        })
    }
}

/// Convert provider data into a route summary.
fn summarize(data: RouteData) -> Result<RouteSummary, PlanError> {
    if data.path.len() < 2 {
        return Err(PlanError::InvalidRouteGeometry {
            points: data.path.len(),
        });
    }

    RouteSummary::from_provider_units(data.distance_meters, data.duration_seconds, data.path)
        .ok_or_else(|| {
            PlanError::RouteUnavailable(format!(
                "malformed route data (distance {} m, duration {} s)",
                data.distance_meters, data.duration_seconds
            ))
        })
}
