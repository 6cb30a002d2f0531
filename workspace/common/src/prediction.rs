use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Request body for `POST /predict`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TrafficFeatures {
    /// Traffic speed (km/h)
    pub traffic_speed: f64,
    /// Traffic density
    pub density: f64,
    /// Temperature (°C)
    pub temperature: f64,
}

/// Human-readable congestion bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum CongestionLabel {
    Low,
    Medium,
    High,
}

impl fmt::Display for CongestionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CongestionLabel::Low => "Low",
            CongestionLabel::Medium => "Medium",
            CongestionLabel::High => "High",
        };
        f.write_str(label)
    }
}

/// Response body for `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PredictionResponse {
    /// Continuous congestion score
    pub predicted_congestion_level: f64,
    /// Congestion class (0 = low, 1 = severe)
    pub predicted_class: i32,
    /// Congestion label
    pub congestion_label: CongestionLabel,
}
