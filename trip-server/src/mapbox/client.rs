//! Mapbox HTTP client.
//!
//! Provides async methods for the Directions and Geocoding APIs.
//! Handles authentication, concurrency limiting, and conversion to
//! planner types.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::Coordinate;
use crate::planner::{RouteData, RouteProvider};

use super::convert::{place_from_geocoding, route_from_directions};
use super::error::MapboxError;
use super::types::{DirectionsResponse, GeocodingResponse};

/// Default base URL for the Mapbox APIs.
const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Default routing profile.
const DEFAULT_PROFILE: &str = "mapbox/driving";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Mapbox client.
#[derive(Debug, Clone)]
pub struct MapboxConfig {
    /// Access token
    pub api_key: String,
    /// Base URL for the API (defaults to production Mapbox)
    pub base_url: String,
    /// Directions routing profile
    pub profile: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapboxConfig {
    /// Create a new config with the given access token.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Mapbox API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
/// Every request is bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct MapboxClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl MapboxClient {
    /// Create a new Mapbox client with the given configuration.
    pub fn new(config: MapboxConfig) -> Result<Self, MapboxError> {
        if config.api_key.trim().is_empty() {
            return Err(MapboxError::Unauthorized);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            profile: config.profile,
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// URL of the Directions request through `waypoints`, in order.
    fn directions_url(&self, waypoints: &[Coordinate]) -> String {
        let coords = waypoints
            .iter()
            .map(Coordinate::to_string)
            .collect::<Vec<_>>()
            .join(";");
        format!("{}/directions/v5/{}/{}", self.base_url, self.profile, coords)
    }

    /// URL of the reverse Geocoding request for `at`.
    fn geocoding_url(&self, at: &Coordinate) -> String {
        format!("{}/geocoding/v5/mapbox.places/{}.json", self.base_url, at)
    }

    /// Get the driving route through the given waypoints.
    ///
    /// Returns `Ok(None)` if Mapbox finds no route between them.
    pub async fn get_directions(
        &self,
        waypoints: &[Coordinate],
    ) -> Result<Option<RouteData>, MapboxError> {
        let url = self.directions_url(waypoints);
        let resp: DirectionsResponse = self
            .get_json(
                &url,
                &[("geometries", "geojson"), ("overview", "full"), ("steps", "false")],
            )
            .await?;

        route_from_directions(&resp)
    }

    /// Get the name of the place at a coordinate.
    ///
    /// Returns `Ok(None)` if Mapbox has no matching place.
    pub async fn get_place_name(&self, at: &Coordinate) -> Result<Option<String>, MapboxError> {
        let url = self.geocoding_url(at);
        let resp: GeocodingResponse = self.get_json(&url, &[]).await?;

        Ok(place_from_geocoding(&resp))
    }

    /// GET `url` with the access token and `params`, decoding a JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, MapboxError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| MapboxError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        debug!(url, "Mapbox request");

        let response = self
            .http
            .get(url)
            .query(&[("access_token", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(MapboxError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MapboxError::RateLimited);
        }

        let body = response.text().await?;

        // Mapbox answers "no route" with a 404/422 and a JSON body carrying
        // the code, so let those through to the converter.
        if !status.is_success()
            && !(status == reqwest::StatusCode::NOT_FOUND
                || status == reqwest::StatusCode::UNPROCESSABLE_ENTITY)
        {
            return Err(MapboxError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| MapboxError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl RouteProvider for MapboxClient {
    type Error = MapboxError;

    async fn get_route(
        &self,
        origin: Coordinate,
        via: Coordinate,
        destination: Coordinate,
    ) -> Result<Option<RouteData>, MapboxError> {
        self.get_directions(&[origin, via, destination]).await
    }

    async fn reverse_geocode(&self, at: Coordinate) -> Result<Option<String>, MapboxError> {
        self.get_place_name(&at).await
    }
}
