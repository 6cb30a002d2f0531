use anyhow::{Context, Result};
use compute::{
    default_predictor,
    prediction::CongestionPredictor,
    traffic::{CachedTrafficProvider, HttpTrafficProvider, TrafficProvider, http::DEFAULT_TRAFFIC_API_URL},
};
use ::config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::{fmt, sync::Arc, time::Duration};
use tracing::{debug, info, warn};

use crate::router::DEFAULT_REQUEST_TIMEOUT;
use crate::schemas::AppState;

/// Configuration file read when `--config` is not given. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "congestion.toml";

/// Prefix of the environment variables overriding file settings,
/// e.g. `CONGESTION_TRAFFIC_API_KEY`.
pub const ENV_PREFIX: &str = "CONGESTION";

/// Service configuration
#[derive(Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Incident-details endpoint of the traffic API
    pub traffic_api_url: String,
    /// Traffic API key; traffic lookups are disabled without it
    pub traffic_api_key: Option<String>,
    /// Timeout for a single traffic API request
    pub traffic_api_timeout_secs: u64,
    /// How long a traffic sample is reused for the same coordinate (0 disables caching)
    pub traffic_cache_ttl_secs: u64,
    /// Timeout applied to every inbound request
    pub request_timeout_secs: u64,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_address", &self.bind_address)
            .field("traffic_api_url", &self.traffic_api_url)
            .field("traffic_api_key", &self.api_key().map(|_| "<redacted>"))
            .field("traffic_api_timeout_secs", &self.traffic_api_timeout_secs)
            .field("traffic_cache_ttl_secs", &self.traffic_cache_ttl_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicitly requested file must exist; the default one is optional.
    pub fn load(path: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let file = path.unwrap_or(DEFAULT_CONFIG_FILE);
        debug!("Loading configuration from {} (required: {})", file, path.is_some());

        Self::defaults_builder()?
            .add_source(File::with_name(file).required(path.is_some()))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Configuration with only the built-in defaults applied.
    pub fn defaults() -> Result<Self> {
        Self::defaults_builder()?
            .build()
            .context("Failed to build default configuration")?
            .try_deserialize()
            .context("Invalid default configuration")
    }

    fn defaults_builder() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("bind_address", "127.0.0.1:8000")?
            .set_default("traffic_api_url", DEFAULT_TRAFFIC_API_URL)?
            .set_default("traffic_api_timeout_secs", 10_i64)?
            .set_default("traffic_cache_ttl_secs", 0_i64)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT.as_secs() as i64)?)
    }

    /// The traffic API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.traffic_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Build the traffic provider described by the configuration, if a key is set.
pub fn build_traffic_provider(config: &AppConfig) -> Result<Option<Arc<dyn TrafficProvider>>> {
    let Some(key) = config.api_key() else {
        warn!("No traffic API key configured; traffic lookups are disabled");
        return Ok(None);
    };

    let http = HttpTrafficProvider::new(
        config.traffic_api_url.clone(),
        key,
        Duration::from_secs(config.traffic_api_timeout_secs),
    )?;

    if config.traffic_cache_ttl_secs > 0 {
        info!("Caching traffic samples for {}s", config.traffic_cache_ttl_secs);
        let cached = CachedTrafficProvider::new(http, 1000, Duration::from_secs(config.traffic_cache_ttl_secs));
        Ok(Some(Arc::new(cached)))
    } else {
        Ok(Some(Arc::new(http)))
    }
}

/// Initialize application state from configuration
pub fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    let predictor: Arc<dyn CongestionPredictor> = Arc::new(default_predictor());
    let traffic = build_traffic_provider(config)?;

    Ok(AppState { predictor, traffic })
}
