//! Conversion from Mapbox DTOs to planner types.

use crate::domain::Coordinate;
use crate::planner::RouteData;

use super::error::MapboxError;
use super::types::{DirectionsResponse, GeocodingResponse};

/// Directions codes that mean "answered, but there is no route".
const NO_ROUTE_CODES: &[&str] = &["NoRoute", "NoSegment"];

/// Take the first route from a Directions response.
///
/// Returns `Ok(None)` when Mapbox reports no route. A route whose geometry
/// holds an invalid position is an error.
pub fn route_from_directions(resp: &DirectionsResponse) -> Result<Option<RouteData>, MapboxError> {
    if let Some(code) = resp.code.as_deref() {
        if NO_ROUTE_CODES.contains(&code) {
            return Ok(None);
        }
        if code != "Ok" {
            return Err(MapboxError::Directions {
                code: code.to_string(),
                message: resp.message.clone().unwrap_or_else(|| code.to_string()),
            });
        }
    }

    let Some(route) = resp.routes.first() else {
        return Ok(None);
    };

    let path = route
        .geometry
        .coordinates
        .iter()
        .map(|[lng, lat]| Coordinate::new(*lng, *lat))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| MapboxError::Json {
            message: format!("route geometry: {e}"),
            body: None,
        })?;

    Ok(Some(RouteData {
        distance_meters: route.distance,
        duration_seconds: route.duration,
        path,
    }))
}

/// Take the most relevant place name from a Geocoding response.
pub fn place_from_geocoding(resp: &GeocodingResponse) -> Option<String> {
    resp.features
        .first()
        .map(|f| f.place_name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directions(json: &str) -> DirectionsResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn converts_first_route() {
        let resp = directions(
            r#"{"code": "Ok", "routes": [
                {"distance": 1000.0, "duration": 60.0,
                 "geometry": {"type": "LineString", "coordinates": [[-97.74, 30.27], [-97.70, 30.30]]}},
                {"distance": 2000.0, "duration": 90.0,
                 "geometry": {"type": "LineString", "coordinates": [[-97.74, 30.27]]}}
            ]}"#,
        );

        let route = route_from_directions(&resp).unwrap().unwrap();
        assert_eq!(route.distance_meters, 1000.0);
        assert_eq!(route.duration_seconds, 60.0);
        assert_eq!(route.path.len(), 2);
        assert_eq!(route.path[1].to_lng_lat(), [-97.70, 30.30]);
    }

    #[test]
    fn no_route_codes_give_none() {
        let resp = directions(r#"{"code": "NoRoute", "message": "No route found", "routes": []}"#);
        assert!(route_from_directions(&resp).unwrap().is_none());

        let resp = directions(r#"{"code": "NoSegment"}"#);
        assert!(route_from_directions(&resp).unwrap().is_none());
    }

    #[test]
    fn empty_routes_give_none() {
        let resp = directions(r#"{"code": "Ok", "routes": []}"#);
        assert!(route_from_directions(&resp).unwrap().is_none());
    }

    #[test]
    fn other_codes_are_errors() {
        let resp = directions(r#"{"code": "ProfileNotFound", "message": "Profile does not exist"}"#);
        let err = route_from_directions(&resp).unwrap_err();
        assert_eq!(
            err.to_string(),
            "directions error ProfileNotFound: Profile does not exist"
        );

        // 422 bodies reach conversion too; the code is reported, not a status.
        let resp = directions(r#"{"code": "InvalidInput"}"#);
        match route_from_directions(&resp) {
            Err(MapboxError::Directions { code, message }) => {
                assert_eq!(code, "InvalidInput");
                assert_eq!(message, "InvalidInput");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn invalid_geometry_is_error() {
        let resp = directions(
            r#"{"code": "Ok", "routes": [
                {"distance": 1.0, "duration": 1.0,
                 "geometry": {"type": "LineString", "coordinates": [[-97.74, 95.0]]}}
            ]}"#,
        );
        assert!(matches!(
            route_from_directions(&resp),
            Err(MapboxError::Json { .. })
        ));
    }

    #[test]
    fn place_name_from_first_feature() {
        let resp: GeocodingResponse = serde_json::from_str(
            r#"{"features": [{"place_name": "Tucumcari, New Mexico, United States"},
                             {"place_name": "New Mexico, United States"}]}"#,
        )
        .unwrap();
        assert_eq!(
            place_from_geocoding(&resp).as_deref(),
            Some("Tucumcari, New Mexico, United States")
        );
    }

    #[test]
    fn no_features_gives_none() {
        let resp: GeocodingResponse = serde_json::from_str(r#"{"features": []}"#).unwrap();
        assert!(place_from_geocoding(&resp).is_none());

        let resp: GeocodingResponse =
            serde_json::from_str(r#"{"features": [{"place_name": "  "}]}"#).unwrap();
        assert!(place_from_geocoding(&resp).is_none());
    }
}
