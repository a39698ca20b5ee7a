use std::path::Path;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trip_server::cache::{CacheConfig, CachedRouteProvider};
use trip_server::config::{ProviderSource, ServerConfig};
use trip_server::mapbox::{FixtureRouteProvider, MapboxClient};
use trip_server::planner::{PlannerConfig, RouteProvider};
use trip_server::store::TripStore;
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trip_server=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let cache_config = CacheConfig::default();

    match &config.provider {
        ProviderSource::Fixture { dir } => {
            let fixture =
                FixtureRouteProvider::load(dir).expect("Failed to load route fixtures");
            info!(dir = %dir.display(), "Using fixture route provider");
            serve(&config, fixture).await;
        }
        ProviderSource::Mapbox { .. } => {
            let mapbox_config = config
                .mapbox_config()
                .expect("Mapbox provider selected without Mapbox config");
            let client = MapboxClient::new(mapbox_config).expect("Failed to create Mapbox client");
            info!(base_url = %config.mapbox_base_url, "Using Mapbox route provider");
            serve(&config, CachedRouteProvider::new(client, &cache_config)).await;
        }
    }
}

async fn serve<P: RouteProvider + 'static>(config: &ServerConfig, provider: P) {
    let state = AppState::new(provider, TripStore::new(), PlannerConfig::default());
    let app = create_router(state, Path::new(&config.static_dir));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %config.addr, "Trip planner listening");
    info!("  GET    /health         - Health check");
    info!("  POST   /create-trip    - Plan a trip");
    info!("  GET    /trips          - List trips");
    info!("  GET    /trips/:id      - Trip with logs");
    info!("  DELETE /trips/:id      - Delete a trip");

    axum::serve(listener, app).await.expect("Server error");
}
