use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GeoPoint {
    /// Latitude (-90..=90)
    pub lat: f64,
    /// Longitude (-180..180)
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns the same point with its longitude folded into `[-180, 180)`.
    ///
    /// Slippy maps keep reporting increasing longitudes when the world is
    /// panned past the antimeridian, so a click on the second copy of London
    /// comes back as `lon = 359.92`.
    pub fn wrapped(self) -> Self {
        let lon = (self.lon + 180.0).rem_euclid(360.0) - 180.0;
        Self { lat: self.lat, lon }
    }
}
