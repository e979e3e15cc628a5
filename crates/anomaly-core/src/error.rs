//! Error types for rolling-window anomaly detection
//!
//! Provides a unified error type for all stream-anomaly crates.

use thiserror::Error;

/// Core error type for anomaly detection operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a constructor or builder
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed configuration document
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Failure while rendering a chart or report
    #[error("Render error: {0}")]
    Render(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a threshold that is negative or not finite
    pub fn invalid_threshold(name: &str, value: f64) -> Self {
        Self::InvalidParameter(format!("{name} must be finite and non-negative, got {value}"))
    }

    /// Create an error for a window that cannot carry a spread estimate
    pub fn invalid_window_size(size: usize) -> Self {
        Self::InvalidParameter(format!("window size must be at least 2, got {size}"))
    }

    /// Create an error for a probability outside [0, 1]
    pub fn invalid_probability(name: &str, p: f64) -> Self {
        Self::InvalidParameter(format!("{name} {p} must be in [0, 1]"))
    }
}

/// Check that a threshold is usable for a strict `>` comparison
pub fn check_threshold(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::invalid_threshold(name, value));
    }
    Ok(())
}
