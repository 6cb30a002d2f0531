use crate::schemas::{AppState, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use common::{PredictionResponse, TrafficFeatures};
use compute::error::ComputeError;
use tracing::{instrument, error, warn, info, debug, trace};

/// Predict congestion from traffic features
///
/// The response body is returned as-is, without the `ApiResponse` envelope.
#[utoipa::path(
    post,
    path = "/predict",
    tag = "prediction",
    request_body = TrafficFeatures,
    responses(
        (status = 200, description = "Congestion predicted", body = PredictionResponse),
        (status = 400, description = "Features cannot be scored", body = ErrorResponse),
        (status = 422, description = "Malformed request body"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn predict(
    State(state): State<AppState>,
    Json(features): Json<TrafficFeatures>,
) -> Result<Json<PredictionResponse>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering predict function");
    debug!(
        "Scoring speed={} density={} temperature={}",
        features.traffic_speed, features.density, features.temperature
    );

    match state.predictor.predict(&features) {
        Ok(prediction) => {
            info!(
                "Predicted congestion level {:.4} (class {}, {})",
                prediction.predicted_congestion_level,
                prediction.predicted_class,
                prediction.congestion_label
            );
            Ok(Json(prediction))
        }
        Err(ComputeError::InvalidInput(message)) => {
            warn!("Rejected features: {}", message);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("INVALID_FEATURES", message)),
            ))
        }
        Err(e) => {
            error!("Error during prediction: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("PREDICTION_FAILED", "Internal server error while predicting congestion")),
            ))
        }
    }
}
