//! Fuel and rest stop placement.
//!
//! Stops are spread evenly along the route geometry and resolved to place
//! names through the provider. A failed lookup never fails the plan; the
//! stop keeps its slot with a fallback name.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{Coordinate, StopPlan};

use super::config::PlannerConfig;
use super::error::PlanError;
use super::provider::RouteProvider;

/// Place name used when a stop cannot be resolved.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Upper bound on stops of one kind.
pub const MAX_STOPS: usize = 10_000;

/// Number of stops for `amount` at one stop per `interval`, at least one
/// and at most [`MAX_STOPS`].
fn stop_count(amount: f64, interval: f64) -> usize {
    let stops = (amount / interval).floor();
    if stops >= MAX_STOPS as f64 {
        MAX_STOPS
    } else if stops >= 1.0 {
        stops as usize
    } else {
        1
    }
}

/// Fuel stops needed for a trip of `total_miles`.
pub fn fuel_stop_count(total_miles: f64, config: &PlannerConfig) -> usize {
    stop_count(total_miles, config.fuel_interval_miles)
}

/// Rest stops needed for a trip of `total_hours`.
pub fn rest_stop_count(total_hours: f64, config: &PlannerConfig) -> usize {
    stop_count(total_hours, config.rest_interval_hours)
}

/// Path indices for `count` evenly spaced stops on a path of `path_len` points.
///
/// Stop `i` sits at `floor((i + 1) * path_len / (count + 1))`, which is
/// always strictly inside the path and never its first point.
pub fn stop_indices(count: usize, path_len: usize) -> Vec<usize> {
    (0..count)
        .map(|i| (i + 1) * path_len / (count + 1))
        .collect()
}

/// Places fuel and rest stops along a route.
pub struct StopPlanner<'a, P: RouteProvider> {
    provider: &'a P,
    config: &'a PlannerConfig,
}

impl<'a, P: RouteProvider> StopPlanner<'a, P> {
    /// Create a new stop planner.
    pub fn new(provider: &'a P, config: &'a PlannerConfig) -> Self {
        Self { provider, config }
    }

    /// Work out the stops for a route and resolve each to a place name.
    ///
    /// Makes one reverse lookup per stop. Fails only if the path has fewer
    /// than two points or the configuration is invalid.
    pub async fn plan_stops(
        &self,
        total_miles: f64,
        total_hours: f64,
        path: &[Coordinate],
    ) -> Result<StopPlan, PlanError> {
        self.config.validate()?;

        if path.len() < 2 {
            return Err(PlanError::InvalidRouteGeometry { points: path.len() });
        }

        let fuel_stops = fuel_stop_count(total_miles, self.config);
        let rest_stops = rest_stop_count(total_hours, self.config);

        debug!(
            fuel_stops,
            rest_stops,
            path_points = path.len(),
            "Placing stops"
        );

        let fuel_stop_places = self.resolve_places(path, fuel_stops).await;
        let rest_stop_places = self.resolve_places(path, rest_stops).await;

        Ok(StopPlan {
            fuel_stop_places,
            rest_stop_places,
        })
    }

    /// Resolve `count` evenly spaced stops, keeping stop order.
    async fn resolve_places(&self, path: &[Coordinate], count: usize) -> Vec<String> {
        let stops: Vec<Coordinate> = stop_indices(count, path.len())
            .into_iter()
            .filter_map(|idx| path.get(idx).copied())
            .collect();

        let mut places = Vec::with_capacity(stops.len());
        for batch in stops.chunks(self.config.lookup_batch_size) {
            let lookups: Vec<_> = batch.iter().map(|at| self.place_name(*at)).collect();
            places.extend(join_all(lookups).await);
        }

        places
    }

    /// Look up one place name, falling back to [`UNKNOWN_LOCATION`].
    async fn place_name(&self, at: Coordinate) -> String {
        let message = match self.provider.reverse_geocode(at).await {
            Ok(Some(name)) if !name.trim().is_empty() => return name,
            Ok(_) => "no matching place".to_string(),
            Err(e) => e.to_string(),
        };

        let err = PlanError::GeocodeLookupFailed {
            coordinate: at,
            message,
        };
        warn!(error = %err, "Using fallback place name");

        UNKNOWN_LOCATION.to_string()
    }
}
