pub mod error;
pub mod prediction;
pub mod traffic;

use prediction::{CongestionThresholds, RuleBasedPredictor};

/// Returns the predictor the service uses unless configured otherwise.
///
/// It scores congestion from the normalised traffic flow with the default
/// thresholds (severe at a flow of 0.5, high above a density of 0.5).
pub fn default_predictor() -> RuleBasedPredictor {
    RuleBasedPredictor::new(CongestionThresholds::default())
}
