use super::Error;
use crate::Result;

/// A geographic coordinate in degrees. Values of this type are only
/// ever in range: latitude is within [-90, 90], longitude within
/// [-180, 180], and both are finite. Out-of-range input is rejected at
/// construction rather than clamped.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    lat: f64,
    lng: f64,
}

impl GeoCoordinate {
    /// Creates a coordinate, rejecting out-of-domain values.

    pub fn new(lat: f64, lng: f64) -> Result<GeoCoordinate> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidInput(format!(
                "latitude {} is out of range",
                lat
            )));
        }

        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(Error::InvalidInput(format!(
                "longitude {} is out of range",
                lng
            )));
        }

        Ok(GeoCoordinate { lat, lng })
    }

    /// Creates a coordinate from values that may have drifted out of
    /// range through arithmetic on a valid coordinate: latitude is
    /// clamped and longitude wrapped. This is for *derived* points
    /// (a projected line endpoint, for instance); caller-supplied
    /// input goes through `new`, which rejects instead.

    pub fn bounded(lat: f64, lng: f64) -> GeoCoordinate {
        GeoCoordinate {
            lat: lat.clamp(-90.0, 90.0),
            lng: (lng + 180.0).rem_euclid(360.0) - 180.0,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.lat
    }

    pub fn longitude(&self) -> f64 {
        self.lng
    }
}
