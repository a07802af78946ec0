//! Parameter validation, performed before any numerical work.

use em_core::{MAX_SAMPLES, Real, TimeGrid, as_hertz, as_seconds};
use em_signal::{SignalKind, SignalSpec};
use em_sim::{InitialState, MotorParameters};

use crate::params::{LATEST_VERSION, ParameterSet};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Inductance (L) cannot be zero.")]
    ZeroInductance,

    #[error("Inertia (J) cannot be zero.")]
    ZeroInertia,

    #[error("Frequency cannot be zero for a {kind} signal.")]
    ZeroFrequency { kind: SignalKind },

    #[error("{field} must be a finite number (got {value}).")]
    NonFinite { field: &'static str, value: Real },

    #[error(
        "Duration ({duration_s} s) gives {samples} sample(s) at {sample_rate_hz} Hz; at least 2 are required."
    )]
    DurationTooShort {
        duration_s: Real,
        sample_rate_hz: Real,
        samples: usize,
    },

    #[error(
        "Duration ({duration_s} s) at {sample_rate_hz} Hz needs {samples} samples; at most {max} are supported.",
        max = MAX_SAMPLES
    )]
    TooManySamples {
        duration_s: Real,
        sample_rate_hz: Real,
        samples: usize,
    },

    #[error("Sample rate must be positive (got {value} Hz).")]
    InvalidSampleRate { value: Real },

    #[error("Unsupported parameter file version: {version} (latest is {latest})", latest = LATEST_VERSION)]
    UnsupportedVersion { version: u32 },
}

/// Reject parameter files written by a newer format version.
pub(crate) fn check_version(set: &ParameterSet) -> Result<(), ValidationError> {
    if set.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: set.version,
        });
    }
    Ok(())
}

/// Validate a full parameter set.
pub fn validate(set: &ParameterSet) -> Result<(), ValidationError> {
    check_version(set)?;
    validate_inputs(
        &set.motor,
        &set.initial,
        &set.signal_spec(),
        set.solver.sample_rate_hz,
    )
}

/// Validate the typed run inputs.
///
/// Order: non-finite values, `L`, `J`, frequency, sample rate, duration
/// (too short, then too long).
/// The first failure is reported.
pub fn validate_inputs(
    params: &MotorParameters,
    init: &InitialState,
    signal: &SignalSpec,
    sample_rate_hz: Real,
) -> Result<(), ValidationError> {
    let frequency_hz = as_hertz(signal.frequency);
    let duration_s = as_seconds(signal.duration);

    let values = [
        ("R", params.r),
        ("L", params.l),
        ("Kt", params.kt),
        ("Ke", params.ke),
        ("J", params.j),
        ("k", params.k),
        ("θ(0)", init.theta0),
        ("ω(0)", init.omega0),
        ("Amplitude", signal.amplitude_v),
        ("Duration", duration_s),
        ("Frequency", frequency_hz),
        ("Sample rate", sample_rate_hz),
    ];
    for (field, value) in values {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field, value });
        }
    }

    if params.l == 0.0 {
        return Err(ValidationError::ZeroInductance);
    }
    if params.j == 0.0 {
        return Err(ValidationError::ZeroInertia);
    }
    if signal.kind.needs_period() && frequency_hz == 0.0 {
        return Err(ValidationError::ZeroFrequency { kind: signal.kind });
    }
    if sample_rate_hz <= 0.0 {
        return Err(ValidationError::InvalidSampleRate {
            value: sample_rate_hz,
        });
    }

    let samples = TimeGrid::sample_count(duration_s, sample_rate_hz);
    if samples < 2 {
        return Err(ValidationError::DurationTooShort {
            duration_s,
            sample_rate_hz,
            samples,
        });
    }
    if samples > MAX_SAMPLES {
        return Err(ValidationError::TooManySamples {
            duration_s,
            sample_rate_hz,
            samples,
        });
    }

    Ok(())
}
