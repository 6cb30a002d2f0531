use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Features that cannot be scored (NaN or infinite values)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport failure while talking to the traffic API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The traffic API answered with a non-success status
    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    /// The traffic API answered with a body that is not JSON
    #[error("Invalid upstream payload: {0}")]
    Payload(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
