use async_trait::async_trait;
use common::{GeoPoint, TrafficSample};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, instrument, trace, warn};

use super::{TrafficProvider, extract_sample};
use crate::error::{ComputeError, Result};

/// Default incident-details endpoint of the traffic API.
pub const DEFAULT_TRAFFIC_API_URL: &str =
    "https://api.tomtom.com/traffic/services/4/incidentDetails";

/// Looks up traffic readings with a single GET against the traffic API.
///
/// The request carries the API key and the coordinate as the `key`, `lat`
/// and `lon` query parameters. No retries are attempted.
pub struct HttpTrafficProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTrafficProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ComputeError::Http(e.without_url()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// The key must never end up in logs.
impl fmt::Debug for HttpTrafficProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTrafficProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl TrafficProvider for HttpTrafficProvider {
    #[instrument(skip(self), fields(lat = point.lat, lon = point.lon))]
    async fn lookup(&self, point: GeoPoint) -> Result<TrafficSample> {
        trace!("Requesting traffic data from {}", self.base_url);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.clone()),
                ("lat", point.lat.to_string()),
                ("lon", point.lon.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                // Strip the URL, it carries the key in its query string.
                let e = e.without_url();
                error!("Traffic API request failed: {}", e);
                ComputeError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Traffic API responded with status {}", status);
            return Err(ComputeError::UpstreamStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ComputeError::Http(e.without_url()))?;
        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            warn!("Traffic API returned a non-JSON body: {}", e);
            ComputeError::Payload(e.to_string())
        })?;

        let sample = extract_sample(&payload);
        debug!(
            "Traffic sample speed={} density={} temperature={}",
            sample.speed, sample.density, sample.temperature
        );
        Ok(sample)
    }
}
