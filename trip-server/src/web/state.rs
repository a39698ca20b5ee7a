//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::{PlannerConfig, RouteProvider};
use crate::store::TripStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
pub struct AppState<P> {
    /// Route provider (usually cached)
    pub provider: Arc<P>,

    /// Trip storage
    pub store: TripStore,

    /// Planner limits
    pub config: Arc<PlannerConfig>,
}

impl<P: RouteProvider> AppState<P> {
    /// Create a new app state.
    pub fn new(provider: P, store: TripStore, config: PlannerConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            store,
            config: Arc::new(config),
        }
    }
}

// Manual impl so the provider itself need not be `Clone`.
impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            store: self.store.clone(),
            config: Arc::clone(&self.config),
        }
    }
}
