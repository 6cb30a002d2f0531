use crate::controller::CongestionApi;
use crate::settings::{self, AppSettings};
use async_trait::async_trait;
use common::{ApiResponse, ErrorResponse, GeoPoint, TrafficFeatures, TrafficSample};
use gloo_net::http::Request;
use serde_json::Value;

/// Parses a successful prediction response.
///
/// A body that is not JSON becomes `Value::Null`, which the session reports
/// as an unexpected response rather than a failed request.
pub fn prediction_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|e| {
        log::warn!("Prediction response is not JSON: {}", e);
        Value::Null
    })
}

/// Talks to the congestion backend with the browser `fetch` API.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpCongestionApi {
    traffic_url: String,
    prediction_url: String,
}

impl HttpCongestionApi {
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            traffic_url: settings.traffic_url(),
            prediction_url: settings.prediction_url(),
        }
    }

    pub fn from_settings() -> Self {
        Self::new(&settings::get_settings())
    }
}

#[async_trait(?Send)]
impl CongestionApi for HttpCongestionApi {
    async fn lookup_traffic(&self, point: GeoPoint) -> Result<TrafficSample, String> {
        let lat = point.lat.to_string();
        let lon = point.lon.to_string();
        log::debug!("GET request to: {}?lat={}&lon={}", self.traffic_url, lat, lon);

        let response = Request::get(&self.traffic_url)
            .query([("lat", lat.as_str()), ("lon", lon.as_str())])
            .send()
            .await
            .map_err(|e| {
                let error_msg = format!("Request failed: {}", e);
                log::error!("GET {} - {}", self.traffic_url, error_msg);
                error_msg
            })?;

        if !response.ok() {
            let status = response.status();
            let error_response: Result<ErrorResponse, _> = response.json().await;
            return Err(match error_response {
                Ok(err) => {
                    log::error!("GET {} - API error {}: {}", self.traffic_url, err.code, err.error);
                    format!("Error: {}", err.error)
                }
                Err(_) => {
                    let error_msg = format!("HTTP error: {}", status);
                    log::error!("GET {} - {}", self.traffic_url, error_msg);
                    error_msg
                }
            });
        }

        log::trace!("GET {} - Response received, parsing JSON", self.traffic_url);
        let api_response: ApiResponse<TrafficSample> = response.json().await.map_err(|e| {
            let error_msg = format!("Failed to parse response: {}", e);
            log::error!("GET {} - {}", self.traffic_url, error_msg);
            error_msg
        })?;

        log::info!("GET {} - Success", self.traffic_url);
        Ok(api_response.data)
    }

    async fn predict(&self, features: &TrafficFeatures) -> Result<Value, String> {
        log::debug!("POST request to: {}", self.prediction_url);

        let response = Request::post(&self.prediction_url)
            .json(features)
            .map_err(|e| {
                let error_msg = format!("Failed to serialize request: {}", e);
                log::error!("POST {} - {}", self.prediction_url, error_msg);
                error_msg
            })?
            .send()
            .await
            .map_err(|e| {
                let error_msg = format!("Request failed: {}", e);
                log::error!("POST {} - {}", self.prediction_url, error_msg);
                error_msg
            })?;

        if !response.ok() {
            let error_msg = format!("HTTP error: {}", response.status());
            log::error!("POST {} - {}", self.prediction_url, error_msg);
            return Err(error_msg);
        }

        let text = response.text().await.map_err(|e| {
            let error_msg = format!("Failed to read response: {}", e);
            log::error!("POST {} - {}", self.prediction_url, error_msg);
            error_msg
        })?;
        let body = prediction_body(&text);

        log::info!("POST {} - Success", self.prediction_url);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionAction, SessionState, UNEXPECTED_RESPONSE};

    #[test]
    fn test_urls_follow_settings() {
        let settings = AppSettings {
            api_host: "traffic.example.com".to_string(),
            api_port: 9000,
            ..AppSettings::default()
        };

        let api = HttpCongestionApi::new(&settings);

        assert_eq!(api.traffic_url, "http://traffic.example.com:9000/api/v1/traffic");
        assert_eq!(api.prediction_url, "http://traffic.example.com:9000/predict");
    }

    #[test]
    fn test_prediction_body_parses_json() {
        let body = prediction_body(r#"{"predicted_congestion_level": 3.14, "predicted_class": "moderate"}"#);
        assert_eq!(body["predicted_congestion_level"], 3.14);
    }

    #[test]
    fn test_non_json_prediction_body_is_unexpected_response() {
        let body = prediction_body("<html>Internal proxy page</html>");
        assert_eq!(body, Value::Null);

        let mut state = SessionState::default();
        state.apply(SessionAction::SubmitStarted);
        state.apply(SessionAction::SubmitFinished(Ok(body)));

        assert_eq!(state.result, None);
        assert_eq!(state.error.as_deref(), Some(UNEXPECTED_RESPONSE));
    }
}
