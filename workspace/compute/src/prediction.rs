use common::{CongestionLabel, PredictionResponse, TrafficFeatures};
use std::fmt::Debug;
use tracing::{debug, instrument, trace, warn};

use crate::error::{ComputeError, Result};

/// Turns a set of traffic features into a congestion prediction.
pub trait CongestionPredictor: Send + Sync + Debug {
    fn predict(&self, features: &TrafficFeatures) -> Result<PredictionResponse>;
}

/// Thresholds used by [`RuleBasedPredictor`].
///
/// Speeds and densities are compared after dividing the raw inputs by 100.
#[derive(Debug, Clone, PartialEq)]
pub struct CongestionThresholds {
    /// Flow at or above which the class is severe (1).
    pub severe_flow: f64,
    /// Density above which the label is always `High`.
    pub high_density: f64,
    /// Speed below which traffic counts as jammed...
    pub jam_speed: f64,
    /// ...provided the density is above this.
    pub jam_density: f64,
    /// Speed below which traffic counts as slow...
    pub slow_speed: f64,
    /// ...provided the density is above this.
    pub slow_density: f64,
    /// Half-open density band `[min, max)` labelled `Medium`.
    pub medium_density: (f64, f64),
}

impl Default for CongestionThresholds {
    fn default() -> Self {
        Self {
            severe_flow: 0.5,
            high_density: 0.5,
            jam_speed: 0.2,
            jam_density: 0.8,
            slow_speed: 0.5,
            slow_density: 0.5,
            medium_density: (0.35, 45.0),
        }
    }
}

/// Scores congestion from the traffic flow `q = density * speed`.
///
/// Temperature is validated but does not contribute to the score.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedPredictor {
    thresholds: CongestionThresholds,
}

impl RuleBasedPredictor {
    pub fn new(thresholds: CongestionThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &CongestionThresholds {
        &self.thresholds
    }

    fn label(&self, speed: f64, density: f64) -> CongestionLabel {
        let t = &self.thresholds;
        let (medium_min, medium_max) = t.medium_density;

        if (speed < t.jam_speed && density > t.jam_density) || density > t.high_density {
            CongestionLabel::High
        } else if (speed < t.slow_speed && density > t.slow_density)
            || (medium_min <= density && density < medium_max)
        {
            CongestionLabel::Medium
        } else {
            CongestionLabel::Low
        }
    }
}

impl CongestionPredictor for RuleBasedPredictor {
    #[instrument(skip(self), fields(speed = features.traffic_speed, density = features.density))]
    fn predict(&self, features: &TrafficFeatures) -> Result<PredictionResponse> {
        trace!("Entering RuleBasedPredictor::predict");

        for (name, value) in [
            ("traffic_speed", features.traffic_speed),
            ("density", features.density),
            ("temperature", features.temperature),
        ] {
            if !value.is_finite() {
                warn!("Rejecting non-finite {}: {}", name, value);
                return Err(ComputeError::InvalidInput(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }

        let speed = features.traffic_speed / 100.0;
        let density = features.density / 100.0;
        let flow = density * speed;

        let predicted_class = if flow >= self.thresholds.severe_flow { 1 } else { 0 };
        let congestion_label = self.label(speed, density);

        debug!(
            "Predicted flow={:.4} class={} label={}",
            flow, predicted_class, congestion_label
        );

        Ok(PredictionResponse {
            predicted_congestion_level: flow,
            predicted_class,
            congestion_label,
        })
    }
}
