use anyhow::{Context, Result, bail};
use common::GeoPoint;
use tracing::debug;

use crate::config::{AppConfig, build_traffic_provider};

pub async fn lookup(config_path: Option<&str>, lat: f64, lon: f64) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let Some(provider) = build_traffic_provider(&config)? else {
        bail!("No traffic API key configured; set CONGESTION_TRAFFIC_API_KEY or traffic_api_key in the config file");
    };

    let point = GeoPoint::new(lat, lon).wrapped();
    debug!("Looking up traffic at {:?}", point);

    let sample = provider
        .lookup(point)
        .await
        .context("Failed to fetch real-time traffic data")?;

    println!("{}", serde_json::to_string_pretty(&sample)?);
    Ok(())
}
