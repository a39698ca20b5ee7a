//! Fixture route provider for testing without API access.
//!
//! Serves one canned route and a table of place names, either built in
//! code or loaded from JSON files in a directory.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{Coordinate, CoordinateKey};
use crate::planner::{RouteData, RouteProvider};

use super::convert::route_from_directions;
use super::error::MapboxError;
use super::types::DirectionsResponse;

/// File holding a Mapbox Directions response.
const DIRECTIONS_FILE: &str = "directions.json";

/// Optional file mapping `"lng,lat"` keys to place names.
const PLACES_FILE: &str = "places.json";

/// Route provider that serves fixed data.
///
/// The same route is returned whatever waypoints are asked for. Place
/// lookups match on coordinates rounded to 1e-5 degrees. Calls are
/// counted so tests can check how often the provider was used.
#[derive(Debug, Clone, Default)]
pub struct FixtureRouteProvider {
    route: Option<RouteData>,
    fail_route: bool,
    places: HashMap<CoordinateKey, String>,
    failing_places: HashSet<CoordinateKey>,
    route_calls: Arc<AtomicUsize>,
    lookup_calls: Arc<AtomicUsize>,
}

impl FixtureRouteProvider {
    /// Create a provider that always returns `route`.
    pub fn new(route: RouteData) -> Self {
        Self {
            route: Some(route),
            ..Default::default()
        }
    }

    /// Create a provider that never finds a route.
    pub fn without_route() -> Self {
        Self::default()
    }

    /// Make route requests fail with an error instead of answering.
    pub fn with_failing_route(mut self) -> Self {
        self.fail_route = true;
        self
    }

    /// Register the place name returned for `at`.
    pub fn with_place(mut self, at: Coordinate, name: impl Into<String>) -> Self {
        self.places.insert(at.cache_key(), name.into());
        self
    }

    /// Make lookups at `at` fail with an error.
    pub fn with_failing_lookup(mut self, at: Coordinate) -> Self {
        self.failing_places.insert(at.cache_key());
        self
    }

    /// Load fixtures from a directory.
    ///
    /// Expects `directions.json` (a Mapbox Directions response) and,
    /// optionally, `places.json` (an object from `"lng,lat"` to place name).
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, MapboxError> {
        let dir = dir.as_ref();

        let directions_path = dir.join(DIRECTIONS_FILE);
        let json = std::fs::read_to_string(&directions_path).map_err(|e| {
            MapboxError::Fixture(format!("failed to read {}: {e}", directions_path.display()))
        })?;
        let directions: DirectionsResponse = serde_json::from_str(&json).map_err(|e| {
            MapboxError::Fixture(format!("failed to parse {}: {e}", directions_path.display()))
        })?;

        let mut provider = Self {
            route: route_from_directions(&directions)?,
            ..Default::default()
        };

        let places_path = dir.join(PLACES_FILE);
        if places_path.is_file() {
            let json = std::fs::read_to_string(&places_path).map_err(|e| {
                MapboxError::Fixture(format!("failed to read {}: {e}", places_path.display()))
            })?;
            let places: HashMap<String, String> = serde_json::from_str(&json).map_err(|e| {
                MapboxError::Fixture(format!("failed to parse {}: {e}", places_path.display()))
            })?;

            for (key, name) in places {
                let at = Coordinate::parse(&key).map_err(|e| {
                    MapboxError::Fixture(format!("bad place key {key:?}: {e}"))
                })?;
                provider = provider.with_place(at, name);
            }
        }

        Ok(provider)
    }

    /// Number of route requests served so far.
    pub fn route_count(&self) -> usize {
        self.route_calls.load(Ordering::SeqCst)
    }

    /// Number of reverse lookups served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }
}

impl RouteProvider for FixtureRouteProvider {
    type Error = MapboxError;

    async fn get_route(
        &self,
        _origin: Coordinate,
        _via: Coordinate,
        _destination: Coordinate,
    ) -> Result<Option<RouteData>, MapboxError> {
        self.route_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_route {
            return Err(MapboxError::Fixture("route request set to fail".to_string()));
        }

        Ok(self.route.clone())
    }

    async fn reverse_geocode(&self, at: Coordinate) -> Result<Option<String>, MapboxError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);

        let key = at.cache_key();
        if self.failing_places.contains(&key) {
            return Err(MapboxError::Fixture(format!("lookup at {at} set to fail")));
        }

        Ok(self.places.get(&key).cloned())
    }
}
