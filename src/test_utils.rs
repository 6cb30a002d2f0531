use crate::router::{DEFAULT_REQUEST_TIMEOUT, create_router};
use crate::schemas::AppState;
use async_trait::async_trait;
use axum::Router;
use common::{GeoPoint, TrafficSample};
use compute::{
    default_predictor,
    error::{ComputeError, Result},
    traffic::TrafficProvider,
};
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// What the fake traffic API answers with.
#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Sample(TrafficSample),
    Status(u16),
    Garbage,
}

/// Traffic provider that records every coordinate it is asked about.
#[derive(Debug)]
pub struct FakeTrafficProvider {
    outcome: FakeOutcome,
    calls: Mutex<Vec<GeoPoint>>,
}

impl FakeTrafficProvider {
    pub fn new(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<GeoPoint> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrafficProvider for FakeTrafficProvider {
    async fn lookup(&self, point: GeoPoint) -> Result<TrafficSample> {
        self.calls.lock().unwrap().push(point);
        match &self.outcome {
            FakeOutcome::Sample(sample) => Ok(*sample),
            FakeOutcome::Status(status) => Err(ComputeError::UpstreamStatus(*status)),
            FakeOutcome::Garbage => Err(ComputeError::Payload("expected value at line 1 column 1".to_string())),
        }
    }
}

/// Install the test subscriber, writing to STDERR, once per test binary.
///
/// The log level is determined by the RUST_LOG environment variable,
/// defaulting to WARN if not set. Later calls keep the first subscriber.
pub fn init_test_tracing() {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| match level.to_uppercase().as_str() {
            "ERROR" => Some(Level::ERROR),
            "WARN" => Some(Level::WARN),
            "INFO" => Some(Level::INFO),
            "DEBUG" => Some(Level::DEBUG),
            "TRACE" => Some(Level::TRACE),
            _ => None,
        })
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::trace!("Test subscriber already installed");
    }
}

/// Create AppState for testing, optionally with a traffic provider
pub fn setup_test_app_state(traffic: Option<Arc<dyn TrafficProvider>>) -> AppState {
    AppState {
        predictor: Arc::new(default_predictor()),
        traffic,
    }
}

/// Create axum app for testing without a traffic provider
pub fn setup_test_app() -> Router {
    init_test_tracing();
    create_router(setup_test_app_state(None), DEFAULT_REQUEST_TIMEOUT)
}

/// Create axum app for testing backed by a fake traffic API
pub fn setup_test_app_with_traffic(outcome: FakeOutcome) -> (Router, Arc<FakeTrafficProvider>) {
    init_test_tracing();
    let provider = Arc::new(FakeTrafficProvider::new(outcome));
    let state = setup_test_app_state(Some(provider.clone()));
    (create_router(state, DEFAULT_REQUEST_TIMEOUT), provider)
}
