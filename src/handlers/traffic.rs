use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::{GeoPoint, TrafficSample};
use compute::error::ComputeError;
use serde::{Deserialize, Serialize};
use tracing::{instrument, error, warn, info, debug, trace};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query parameters for the traffic lookup
#[derive(Debug, Deserialize, Serialize, ToSchema, IntoParams, Validate)]
pub struct TrafficQuery {
    /// Latitude in decimal degrees
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    /// Longitude in decimal degrees
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse::new(code, message)))
}

/// Look up real-time traffic data near a coordinate
///
/// Proxies one request to the traffic API using the server-side key and
/// returns the speed, density and temperature found there (0 when absent).
#[utoipa::path(
    get,
    path = "/api/v1/traffic",
    tag = "traffic",
    params(TrafficQuery),
    responses(
        (status = 200, description = "Traffic data retrieved successfully", body = ApiResponse<TrafficSample>),
        (status = 400, description = "Invalid coordinates", body = ErrorResponse),
        (status = 502, description = "Traffic API request failed", body = ErrorResponse),
        (status = 503, description = "Traffic API is not configured", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_traffic(
    Valid(Query(query)): Valid<Query<TrafficQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TrafficSample>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_traffic function");

    // Range validation lets NaN through.
    if !query.lat.is_finite() || !query.lon.is_finite() {
        warn!("Rejecting non-finite coordinate lat={} lon={}", query.lat, query.lon);
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_COORDINATES",
            "Latitude and longitude must be finite numbers",
        ));
    }

    let Some(provider) = state.traffic.as_ref() else {
        warn!("Traffic lookup requested but no traffic API key is configured");
        return Err(error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "TRAFFIC_API_NOT_CONFIGURED",
            "Traffic lookups are not configured on this server",
        ));
    };

    let point = GeoPoint::new(query.lat, query.lon);
    debug!("Looking up traffic at {:?}", point);

    match provider.lookup(point).await {
        Ok(sample) => {
            info!(
                "Traffic at ({}, {}): speed={} density={} temperature={}",
                point.lat, point.lon, sample.speed, sample.density, sample.temperature
            );
            Ok(Json(ApiResponse {
                data: sample,
                message: "Traffic data retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(e) => {
            error!("Error fetching traffic data: {}", e);
            let message = match e {
                ComputeError::UpstreamStatus(status) => format!("Traffic API responded with status {}", status),
                ComputeError::Payload(_) => "Traffic API returned an unreadable response".to_string(),
                _ => "Traffic API request failed".to_string(),
            };
            Err(error_response(StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", message))
        }
    }
}
