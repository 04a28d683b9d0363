// src/error.rs
use thiserror::Error;

use crate::network::error::NetworkError;

#[derive(Debug, Error)]
pub enum PlatoonError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Maneuver error: {0}")]
    Maneuver(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Scheduler error: {0}")]
    Scheduler(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other: {0}")]
    Other(String),
}
