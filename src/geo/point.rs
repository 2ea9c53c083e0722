//! Latitude/longitude points.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Errors raised when a coordinate pair cannot represent a point on the map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("coordinate is not a finite number (lat {lat}, lng {lng})")]
    NonFinite { lat: f64, lng: f64 },

    #[error("latitude {0} is outside -90..=90")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside -180..=180")]
    LongitudeOutOfRange(f64),
}

/// A point on the map in the surface's native (WGS84) projection.
///
/// Construct through [`Point::new`], which rejects NaN, infinities and
/// out-of-range values, so every `Point` in circulation is displayable.
/// Serialized as a `[lat, lng]` pair; deserializing goes through the same checks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    /// Latitude in degrees, -90 (south) to 90 (north)
    pub lat: f64,
    /// Longitude in degrees, -180 (west) to 180 (east)
    pub lng: f64,
}

impl Point {
    /// Creates a validated point.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(GeoError::NonFinite { lat, lng });
        }
        if !LATITUDE_RANGE.contains(&lat) {
            return Err(GeoError::LatitudeOutOfRange(lat));
        }
        if !LONGITUDE_RANGE.contains(&lng) {
            return Err(GeoError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Re-checks a point that may have been built with a struct literal.
    pub fn validate(self) -> Result<Self, GeoError> {
        Self::new(self.lat, self.lng)
    }

    /// Returns the point as a `[lat, lng]` pair.
    pub fn to_pair(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

impl TryFrom<[f64; 2]> for Point {
    type Error = GeoError;

    fn try_from([lat, lng]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(lat, lng)
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        point.to_pair()
    }
}
