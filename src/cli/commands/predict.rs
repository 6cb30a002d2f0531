use anyhow::{Context, Result};
use common::TrafficFeatures;
use compute::{default_predictor, prediction::CongestionPredictor};
use tracing::debug;

pub fn predict(speed: f64, density: f64, temperature: f64) -> Result<()> {
    let features = TrafficFeatures {
        traffic_speed: speed,
        density,
        temperature,
    };
    debug!("Scoring {:?} from the command line", features);

    let prediction = default_predictor()
        .predict(&features)
        .context("Failed to predict congestion")?;

    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}
