//! Geographic coordinate types.

use std::fmt;

/// Error returned when parsing or constructing an invalid coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// Cache key for a coordinate: longitude and latitude in units of 1e-5 degrees.
pub type CoordinateKey = (i64, i64);

/// A WGS84 position as a (longitude, latitude) pair.
///
/// Longitude comes first, matching GeoJSON and the routing provider.
/// Any `Coordinate` is finite and within range by construction.
///
/// # Examples
///
/// ```
/// use trip_server::domain::Coordinate;
///
/// let austin = Coordinate::parse("-97.7431,30.2672").unwrap();
/// assert_eq!(austin.longitude(), -97.7431);
/// assert_eq!(austin.latitude(), 30.2672);
/// assert_eq!(austin.to_string(), "-97.7431,30.2672");
///
/// // Latitude out of range is rejected
/// assert!(Coordinate::parse("10.0,95.0").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    longitude: f64,
    latitude: f64,
}

impl Coordinate {
    /// Create a coordinate, checking both components are finite and in range.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, InvalidCoordinate> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(InvalidCoordinate {
                reason: "components must be finite numbers",
            });
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }

        Ok(Coordinate {
            longitude,
            latitude,
        })
    }

    /// Parse a `"longitude,latitude"` string.
    ///
    /// Whitespace around either component is ignored.
    pub fn parse(s: &str) -> Result<Self, InvalidCoordinate> {
        let (lng, lat) = s.split_once(',').ok_or(InvalidCoordinate {
            reason: "expected \"longitude,latitude\"",
        })?;

        let longitude = lng.trim().parse::<f64>().map_err(|_| InvalidCoordinate {
            reason: "longitude is not a number",
        })?;
        let latitude = lat.trim().parse::<f64>().map_err(|_| InvalidCoordinate {
            reason: "latitude is not a number",
        })?;

        Self::new(longitude, latitude)
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// GeoJSON position order: `[longitude, latitude]`.
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Rounded key for cache lookups (about one metre of precision).
    pub fn cache_key(&self) -> CoordinateKey {
        (
            (self.longitude * 1e5).round() as i64,
            (self.latitude * 1e5).round() as i64,
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        let c = Coordinate::parse("-122.4194,37.7749").unwrap();
        assert_eq!(c.longitude(), -122.4194);
        assert_eq!(c.latitude(), 37.7749);

        let c = Coordinate::parse(" 2.35 , 48.85 ").unwrap();
        assert_eq!(c.to_lng_lat(), [2.35, 48.85]);
    }

    #[test]
    fn parse_accepts_bounds() {
        assert!(Coordinate::parse("180,90").is_ok());
        assert!(Coordinate::parse("-180,-90").is_ok());
        assert!(Coordinate::parse("0,0").is_ok());
    }

    #[test]
    fn reject_malformed() {
        assert!(Coordinate::parse("").is_err());
        assert!(Coordinate::parse("Chicago, IL").is_err());
        assert!(Coordinate::parse("-87.6").is_err());
        assert!(Coordinate::parse("1,2,3").is_err());
        assert!(Coordinate::parse("NaN,10").is_err());
        assert!(Coordinate::parse("inf,10").is_err());
    }

    #[test]
    fn reject_out_of_range() {
        let err = Coordinate::new(181.0, 0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid coordinate: longitude must be within [-180, 180]"
        );

        let err = Coordinate::new(0.0, -90.5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid coordinate: latitude must be within [-90, 90]"
        );
    }

    #[test]
    fn display_roundtrip() {
        let c = Coordinate::new(-97.7431, 30.2672).unwrap();
        assert_eq!(c.to_string(), "-97.7431,30.2672");
        assert_eq!(Coordinate::parse(&c.to_string()).unwrap(), c);
    }

    #[test]
    fn cache_key_rounds_to_five_decimals() {
        let a = Coordinate::new(-97.743101, 30.267199).unwrap();
        let b = Coordinate::new(-97.74310, 30.26720).unwrap();
        assert_eq!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), (-9_774_310, 3_026_720));

        let c = Coordinate::new(-97.74320, 30.26720).unwrap();
        assert_ne!(a.cache_key(), c.cache_key());
    }
}
