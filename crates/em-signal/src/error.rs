//! Error types for signal synthesis.

use crate::waveform::SignalKind;
use thiserror::Error;

/// Result type for signal operations.
pub type SignalResult<T> = Result<T, SignalError>;

/// Errors that can occur while building an excitation sequence.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SignalError {
    /// Rectangle and Triangle need a finite period.
    #[error("{kind} signal requires a non-zero frequency")]
    ZeroFrequency { kind: SignalKind },

    #[error("Non-finite signal parameter {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    /// Name that does not match any waveform kind.
    #[error("Unknown signal type '{name}' (expected Rectangle, Triangle or Harmonic)")]
    UnknownKind { name: String },
}
