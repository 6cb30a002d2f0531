use crate::map::MapOptions;
use common::GeoPoint;
use log::Level;
use web_sys::window;

const STORAGE_PREFIX: &str = "congestion_";

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Backend host (e.g., "127.0.0.1" or "traffic.example.com")
    pub api_host: String,

    /// Backend port
    pub api_port: u16,

    /// Use HTTPS for backend requests
    pub api_use_https: bool,

    /// Path of the prediction endpoint
    pub prediction_path: String,

    /// Path of the traffic lookup endpoint
    pub traffic_path: String,

    pub map_center: GeoPoint,
    pub map_zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,

    /// Default log level for the application
    pub log_level: Level,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "127.0.0.1".to_string(),
            api_port: 8000,
            api_use_https: false,
            prediction_path: "/predict".to_string(),
            traffic_path: "/api/v1/traffic".to_string(),
            map_center: GeoPoint::new(51.505, -0.09),
            map_zoom: 13,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution: "&copy; OpenStreetMap contributors".to_string(),
            log_level: Level::Info,
        }
    }
}

impl AppSettings {
    /// Create settings from the page location and localStorage overrides
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            if hostname == "localhost" || hostname == "127.0.0.1" {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            settings.apply_overrides(|key| storage.get_item(&format!("{}{}", STORAGE_PREFIX, key)).ok().flatten());
        }

        settings
    }

    /// Applies stored values; unparsable values keep the current setting.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_host) = lookup("api_host") {
            self.api_host = api_host;
        }
        if let Some(port) = lookup("api_port").and_then(|v| v.parse::<u16>().ok()) {
            self.api_port = port;
        }
        if let Some(use_https) = lookup("api_use_https") {
            self.api_use_https = use_https.to_lowercase() == "true";
        }
        if let Some(lat) = lookup("map_lat").and_then(|v| v.parse::<f64>().ok()) {
            self.map_center.lat = lat;
        }
        if let Some(lon) = lookup("map_lon").and_then(|v| v.parse::<f64>().ok()) {
            self.map_center.lon = lon;
        }
        if let Some(zoom) = lookup("map_zoom").and_then(|v| v.parse::<u8>().ok()) {
            self.map_zoom = zoom;
        }
        if let Some(tile_url) = lookup("tile_url") {
            self.tile_url = tile_url;
        }
        if let Some(log_level) = lookup("log_level") {
            self.log_level = match log_level.to_lowercase().as_str() {
                "error" => Level::Error,
                "warn" => Level::Warn,
                "info" => Level::Info,
                "debug" => Level::Debug,
                "trace" => Level::Trace,
                _ => self.log_level,
            };
        }
    }

    /// Get the backend origin (protocol + host + port)
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!("{}://{}:{}", protocol, self.api_host, self.api_port)
    }

    pub fn prediction_url(&self) -> String {
        format!("{}{}", self.api_base_url(), self.prediction_path)
    }

    pub fn traffic_url(&self) -> String {
        format!("{}{}", self.api_base_url(), self.traffic_path)
    }

    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            center: self.map_center,
            zoom: self.map_zoom,
            tile_url: self.tile_url.clone(),
            attribution: self.tile_attribution.clone(),
        }
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
