use common::{CongestionLabel, GeoPoint, PredictionResponse, TrafficFeatures, TrafficSample};
use compute::{prediction::CongestionPredictor, traffic::TrafficProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

pub use common::{ApiResponse, ErrorResponse};

use crate::handlers::traffic::TrafficQuery;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Scores traffic features
    pub predictor: Arc<dyn CongestionPredictor>,
    /// Traffic API client, absent when no key is configured
    pub traffic: Option<Arc<dyn TrafficProvider>>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Traffic API status ("configured" or "not_configured")
    pub traffic_api: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::predict::predict,
        crate::handlers::traffic::get_traffic,
    ),
    components(
        schemas(
            ApiResponse<TrafficSample>,
            ErrorResponse,
            HealthResponse,
            TrafficQuery,
            TrafficFeatures,
            TrafficSample,
            PredictionResponse,
            CongestionLabel,
            GeoPoint,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "prediction", description = "Congestion prediction endpoints"),
        (name = "traffic", description = "Real-time traffic lookup endpoints"),
    ),
    info(
        title = "Congestion API",
        description = "Traffic congestion prediction service with a server-side traffic API proxy",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
