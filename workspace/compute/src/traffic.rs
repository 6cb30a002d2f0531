use async_trait::async_trait;
use common::{GeoPoint, TrafficSample};
use serde_json::Value;
use std::fmt::Debug;
use tracing::trace;

use crate::error::Result;

pub mod cache;
pub mod http;

pub use cache::CachedTrafficProvider;
pub use http::HttpTrafficProvider;

/// Source of traffic readings for a coordinate.
#[async_trait]
pub trait TrafficProvider: Send + Sync + Debug {
    async fn lookup(&self, point: GeoPoint) -> Result<TrafficSample>;
}

/// Pulls `speed`, `density` and `temperature` out of an upstream payload.
///
/// Each field falls back to `0.0` when it is missing, null, not numeric or
/// not finite. Numeric strings are accepted.
pub fn extract_sample(payload: &Value) -> TrafficSample {
    TrafficSample {
        speed: numeric_field(payload, "speed"),
        density: numeric_field(payload, "density"),
        temperature: numeric_field(payload, "temperature"),
    }
}

fn numeric_field(payload: &Value, name: &str) -> f64 {
    let value = match payload.get(name) {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match value {
        Some(v) if v.is_finite() => v,
        _ => {
            trace!("Field '{}' missing or not numeric, defaulting to 0", name);
            0.0
        }
    }
}
