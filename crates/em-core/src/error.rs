use thiserror::Error;

pub type EmResult<T> = Result<T, EmError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Time grid needs at least 2 samples, got {samples} (duration={duration_s} s)")]
    InsufficientSamples { samples: usize, duration_s: f64 },

    #[error("Time grid would need {samples} samples (limit {max})")]
    TooManySamples { samples: usize, max: usize },
}
