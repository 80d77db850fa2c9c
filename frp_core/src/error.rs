//! Error types for the measurement core.

use frp::config::ConfigError;
use thiserror::Error;

/// Errors reported by the measurement core.
///
/// None of these abort a scan in progress: a rejected sample leaves the
/// accumulator exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Sample rejected (non-finite angle, non-finite or non-positive diameter).
    #[error(
        "Invalid sample: angle={angle_deg} outer={outer_diameter} inner={inner_diameter} ({reason})"
    )]
    InvalidSample {
        /// Reported angle [deg].
        angle_deg: f64,
        /// Reported outer diameter [mm].
        outer_diameter: f64,
        /// Reported inner diameter [mm].
        inner_diameter: f64,
        /// Which check failed.
        reason: &'static str,
    },

    /// Configuration could not be loaded or validated.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation invoked before the engine was initialized.
    #[error("Measurement core not initialized")]
    NotInitialized,

    /// Reconfiguration attempted on an initialized engine.
    #[error("Measurement core already initialized")]
    AlreadyInitialized,
}

impl From<ConfigError> for CoreError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

/// Result type for measurement core operations.
pub type CoreResult<T> = Result<T, CoreError>;
