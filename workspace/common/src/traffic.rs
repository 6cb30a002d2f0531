use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Traffic readings near a coordinate, already normalised for the form.
///
/// Any field the upstream API did not report is `0.0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct TrafficSample {
    /// Observed speed (km/h)
    pub speed: f64,
    /// Observed traffic density
    pub density: f64,
    /// Air temperature (°C)
    pub temperature: f64,
}
