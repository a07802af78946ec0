//! Error types for the em-app service layer.

use std::path::PathBuf;

use crate::validate::ValidationError;

/// Application error type that wraps errors from the core crates
/// and provides a unified error interface for both CLI and GUI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Signal error: {0}")]
    Signal(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Core error: {0}")]
    Core(String),

    #[error("Failed to read parameter file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write parameter file: {path}")]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for em-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from core error types
impl From<em_core::EmError> for AppError {
    fn from(err: em_core::EmError) -> Self {
        AppError::Core(err.to_string())
    }
}

impl From<em_signal::SignalError> for AppError {
    fn from(err: em_signal::SignalError) -> Self {
        AppError::Signal(err.to_string())
    }
}

impl From<em_sim::SimError> for AppError {
    fn from(err: em_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}
