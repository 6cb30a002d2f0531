use anyhow::Result;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, debug, trace, error};

use crate::config::{AppConfig, initialize_app_state};
use crate::router::create_router;

pub async fn serve(config_path: Option<&str>, bind_override: Option<&str>) -> Result<()> {
    trace!("Entering serve function");
    info!("Congestion service starting up");

    let config = AppConfig::load(config_path)?;
    let bind_address = bind_override.unwrap_or(&config.bind_address).to_string();
    debug!("Configuration: {:?}", config);
    debug!("Bind address: {}", bind_address);

    // Initialize application state
    trace!("Initializing application state");
    let state = match initialize_app_state(&config) {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    // Create router
    trace!("Creating application router");
    let app = create_router(state, Duration::from_secs(config.request_timeout_secs));
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Congestion API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
