//! HTTP route handlers.

use std::path::Path as FsPath;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tower_http::services::ServeDir;
use tracing::{debug, error, info, warn};

use crate::domain::TripId;
use crate::planner::{PlanError, RouteProvider, TripPlanner};
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<P>(state: AppState<P>, static_dir: impl AsRef<FsPath>) -> Router
where
    P: RouteProvider + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/create-trip", post(create_trip::<P>))
        .route("/create-trip/", post(create_trip::<P>))
        .route("/api/trips", post(create_trip::<P>))
        .route("/trips", get(list_trips::<P>))
        .route("/trips/:id", get(get_trip::<P>).delete(delete_trip::<P>))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan a trip and store it with its logs.
async fn create_trip<P: RouteProvider + 'static>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: CreateTripRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(body = %String::from_utf8_lossy(&body), "Rejected trip request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let trip_request = req
        .to_trip_request()
        .map_err(|message| AppError::BadRequest { message })?;

    let start_date = Local::now().date_naive();
    let planner = TripPlanner::new(state.provider.as_ref(), &state.config);
    let plan = planner.plan_trip(&trip_request, start_date).await?;

    // Only store trips that planned successfully.
    let record = state.store.create_trip(&trip_request, &plan.logs).await;

    info!(
        trip_id = %record.id,
        distance = %plan.distance_display(),
        days = plan.logs.len(),
        "Trip created"
    );

    if accepts_html(&headers) {
        let html = TripPlanTemplate::from_plan(&record, &plan)
            .render()
            .map_err(|e| AppError::Internal {
                message: format!("Template error: {e}"),
            })?;

        Ok((StatusCode::CREATED, Html(html)).into_response())
    } else {
        let response = TripPlanResponse::from_plan(&record, &plan);
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }
}

/// List stored trips, newest first.
async fn list_trips<P: RouteProvider + 'static>(
    State(state): State<AppState<P>>,
) -> Json<TripListResponse> {
    let trips = state
        .store
        .list()
        .await
        .iter()
        .map(TripResult::from_record)
        .collect();

    Json(TripListResponse { trips })
}

/// Get one trip with its logs.
async fn get_trip<P: RouteProvider + 'static>(
    State(state): State<AppState<P>>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<TripDetailResponse>, AppError> {
    let Path(id) = path?;
    let id = TripId(id);
    let stored = state
        .store
        .get(id)
        .await
        .ok_or(StoreError::TripNotFound(id))?;

    Ok(Json(TripDetailResponse::from_stored(&stored)))
}

/// Delete a trip and its logs.
async fn delete_trip<P: RouteProvider + 'static>(
    State(state): State<AppState<P>>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    let removed = state.store.delete(TripId(id)).await?;
    info!(trip_id = id, logs = removed.logs.len(), "Trip deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::RouteUnavailable(_) => AppError::Upstream {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::TripNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::BadRequest {
            message: format!("Invalid trip id: {}", e.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            if status == StatusCode::BAD_GATEWAY {
                warn!(%status, error = %message, "Request failed");
            } else {
                error!(%status, error = %message, "Request failed");
            }
        } else {
            debug!(%status, error = %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, METERS_PER_MILE};
    use crate::mapbox::FixtureRouteProvider;
    use crate::planner::{PlannerConfig, RouteData};
    use crate::store::TripStore;
    use serde_json::{Value, json};

    fn path(len: usize) -> Vec<Coordinate> {
        (0..len)
            .map(|i| Coordinate::new(-97.0 - i as f64 * 0.5, 30.0 + i as f64 * 0.5).unwrap())
            .collect()
    }

    /// 1500 miles, 8 h of driving (10 h with the handling allowance).
    fn fixture() -> FixtureRouteProvider {
        let path = path(10);
        let fuel_stop = path[5];
        FixtureRouteProvider::new(RouteData {
            distance_meters: 1500.0 * METERS_PER_MILE,
            duration_seconds: 8.0 * 3600.0,
            path,
        })
        .with_place(fuel_stop, "Amarillo, Texas, United States")
    }

    /// Serve the router on an ephemeral port and return its base URL.
    async fn serve(provider: FixtureRouteProvider) -> (String, TripStore) {
        let store = TripStore::new();
        let state = AppState::new(provider, store.clone(), PlannerConfig::default());
        let static_dir = FsPath::new(env!("CARGO_MANIFEST_DIR")).join("static");
        let app = create_router(state, static_dir);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), store)
    }

    fn trip_body() -> Value {
        json!({
            "current_location": "-97.7431,30.2672",
            "pickup_location": "-96.797,32.7767",
            "dropoff_location": "-104.9903,39.7392",
            "cycle_hours": "12"
        })
    }

    #[tokio::test]
    async fn health_check() {
        let (base, _) = serve(fixture()).await;

        let resp = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn create_trip_returns_plan() {
        let (base, store) = serve(fixture()).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/create-trip"))
            .json(&trip_body())
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["trip"]["id"], 1);
        assert_eq!(body["trip"]["pickup_location"], "-96.797,32.7767");
        assert_eq!(body["trip"]["cycle_hours"], 12.0);
        assert_eq!(body["route_info"]["distance"], "1500.00 miles");
        assert_eq!(body["route_info"]["duration"], "10.00 hours");
        assert_eq!(body["route_info"]["total_days"], 1);
        assert_eq!(body["stops"]["fuel_stops"], 1);
        assert_eq!(body["stops"]["rest_stops"], 1);
        assert_eq!(
            body["stops"]["fuel_stop_locations"],
            json!(["Amarillo, Texas, United States"])
        );
        assert_eq!(
            body["stops"]["rest_stop_locations"],
            json!(["Amarillo, Texas, United States"])
        );
        assert_eq!(body["logs"].as_array().unwrap().len(), 1);
        assert_eq!(body["logs"][0]["driving_hours"], 10.0);
        assert_eq!(body["logs"][0]["on_duty_hours"], 13.0);
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(body["logs"][0]["date"], today);
        assert_eq!(body["route_geometry"]["type"], "LineString");
        assert_eq!(body["route_geometry"]["coordinates"].as_array().unwrap().len(), 10);

        let stored = store.get(TripId(1)).await.unwrap();
        assert_eq!(stored.logs.len(), 1);
    }

    #[tokio::test]
    async fn create_trip_alias_and_html() {
        let (base, _) = serve(fixture()).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/api/trips"))
            .header(header::ACCEPT, "text/html")
            .json(&trip_body())
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);

        let html = resp.text().await.unwrap();
        assert!(html.contains("Trip 1"));
        assert!(html.contains("1500.00 miles"));
        assert!(html.contains("Amarillo, Texas, United States"));
    }

    #[tokio::test]
    async fn bad_requests_are_rejected() {
        let (base, store) = serve(fixture()).await;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{base}/create-trip"))
            .body("not json")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));

        let mut bad = trip_body();
        bad["dropoff_location"] = json!("Denver");
        let resp = client
            .post(format!("{base}/create-trip"))
            .json(&bad)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);

        let mut bad = trip_body();
        bad["cycle_hours"] = json!(-3);
        let resp = client
            .post(format!("{base}/create-trip"))
            .json(&bad)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn missing_route_is_bad_gateway_and_stores_nothing() {
        let (base, store) = serve(FixtureRouteProvider::without_route()).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/create-trip"))
            .json(&trip_body())
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 502);

        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("route unavailable"));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn trips_list_get_and_delete() {
        let (base, _) = serve(fixture()).await;
        let client = reqwest::Client::new();

        for _ in 0..2 {
            let resp = client
                .post(format!("{base}/create-trip"))
                .json(&trip_body())
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 201);
        }

        let list: Value = client
            .get(format!("{base}/trips"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let ids: Vec<u64> = list["trips"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 1]);

        let detail: Value = client
            .get(format!("{base}/trips/1"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(detail["trip"]["id"], 1);
        assert_eq!(detail["logs"].as_array().unwrap().len(), 1);
        assert_eq!(detail["logs"][0]["trip"], 1);

        let resp = client.delete(format!("{base}/trips/1")).send().await.unwrap();
        assert_eq!(resp.status(), 204);

        let resp = client.get(format!("{base}/trips/1")).send().await.unwrap();
        assert_eq!(resp.status(), 404);
        let resp = client.delete(format!("{base}/trips/1")).send().await.unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn non_numeric_trip_id_is_json_bad_request() {
        let (base, _) = serve(fixture()).await;
        let client = reqwest::Client::new();

        for resp in [
            client.get(format!("{base}/trips/abc")).send().await.unwrap(),
            client.delete(format!("{base}/trips/abc")).send().await.unwrap(),
            client.get(format!("{base}/trips/-1")).send().await.unwrap(),
        ] {
            assert_eq!(resp.status(), 400);
            let body: Value = resp.json().await.unwrap();
            assert!(body["error"].as_str().unwrap().starts_with("Invalid trip id"));
        }
    }

    #[tokio::test]
    async fn serves_static_assets() {
        let (base, _) = serve(fixture()).await;

        let resp = reqwest::get(format!("{base}/static/style.css")).await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[test]
    fn plan_errors_map_to_status() {
        let resp = AppError::from(PlanError::RouteUnavailable("down".to_string())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let resp = AppError::from(PlanError::InvalidDuration(0.0)).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = AppError::from(StoreError::TripNotFound(TripId(4))).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
