//! Transport-layer types shared between the backend and the frontend.
//! The backend serialises these from its handlers and the frontend
//! deserialises them, so both sides agree on a single shape.

mod geo;
mod prediction;
mod traffic;

pub use geo::GeoPoint;
pub use prediction::{CongestionLabel, PredictionResponse, TrafficFeatures};
pub use traffic::TrafficSample;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response envelope used by the `/api/v1` routes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

/// Error body returned by every route on failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_response_wire_format() {
        let response = PredictionResponse {
            predicted_congestion_level: 0.27,
            predicted_class: 0,
            congestion_label: CongestionLabel::High,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["predicted_congestion_level"], 0.27);
        assert_eq!(json["predicted_class"], 0);
        assert_eq!(json["congestion_label"], "High");
    }

    #[test]
    fn test_traffic_features_accepts_integer_json() {
        let features: TrafficFeatures =
            serde_json::from_str(r#"{"traffic_speed": 42, "density": 0.7, "temperature": 0}"#)
                .unwrap();

        assert_eq!(features.traffic_speed, 42.0);
        assert_eq!(features.density, 0.7);
        assert_eq!(features.temperature, 0.0);
    }

    #[test]
    fn test_error_response_is_never_successful() {
        let error = ErrorResponse::new("UPSTREAM_ERROR", "Traffic provider failed");
        assert!(!error.success);
        assert_eq!(error.code, "UPSTREAM_ERROR");
    }
}
