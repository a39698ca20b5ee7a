//! Caching layer for route provider responses.
//!
//! Repeated trips between the same places ask for the same route, and
//! stops on overlapping routes land on the same coordinates. Routes and
//! place names are cached with a TTL, keyed by coordinates rounded to
//! 1e-5 degrees. Failed calls are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{Coordinate, CoordinateKey};
use crate::planner::{RouteData, RouteProvider};

/// Cache key for routes: (origin, via, destination).
type RouteKey = (CoordinateKey, CoordinateKey, CoordinateKey);

/// Cached route entry. `None` records that the provider found no route.
type RouteEntry = Arc<Option<RouteData>>;

/// Cached place entry. `None` records that the provider had no match.
type PlaceEntry = Option<Arc<str>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 1000,
        }
    }
}

/// Route provider with caching.
///
/// Wraps any `RouteProvider` and caches its successful answers.
pub struct CachedRouteProvider<P> {
    inner: P,
    routes: MokaCache<RouteKey, RouteEntry>,
    places: MokaCache<CoordinateKey, PlaceEntry>,
}

impl<P: RouteProvider> CachedRouteProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let places = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            routes,
            places,
        }
    }

    /// Get cache statistics: (routes, places).
    pub fn entry_counts(&self) -> (u64, u64) {
        (self.routes.entry_count(), self.places.entry_count())
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
        self.places.invalidate_all();
    }
}

impl<P: RouteProvider> RouteProvider for CachedRouteProvider<P> {
    type Error = P::Error;

    async fn get_route(
        &self,
        origin: Coordinate,
        via: Coordinate,
        destination: Coordinate,
    ) -> Result<Option<RouteData>, P::Error> {
        let key = (origin.cache_key(), via.cache_key(), destination.cache_key());

        if let Some(cached) = self.routes.get(&key).await {
            return Ok(cached.as_ref().clone());
        }

        let route = self.inner.get_route(origin, via, destination).await?;
        self.routes.insert(key, Arc::new(route.clone())).await;

        Ok(route)
    }

    async fn reverse_geocode(&self, at: Coordinate) -> Result<Option<String>, P::Error> {
        let key = at.cache_key();

        if let Some(cached) = self.places.get(&key).await {
            return Ok(cached.map(|name| name.to_string()));
        }

        let place = self.inner.reverse_geocode(at).await?;
        self.places
            .insert(key, place.as_deref().map(Arc::from))
            .await;

        Ok(place)
    }
}
