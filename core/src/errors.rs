//! Error taxonomy for the simulator and scenario loading

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    /// Rejected before anything is scheduled
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Failed to parse scenario: {0}")]
    ScenarioParse(#[from] toml::de::Error),

    #[error("Failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
}
