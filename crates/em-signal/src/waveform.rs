//! Waveform kinds and excitation sequence generation.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use em_core::{Frequency, Real, Time, TimeGrid, as_hertz, floor_mod};
use serde::{Deserialize, Serialize};

use crate::error::{SignalError, SignalResult};

/// Shape of the excitation voltage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignalKind {
    #[default]
    #[serde(alias = "rectangle")]
    Rectangle,
    #[serde(alias = "triangle")]
    Triangle,
    #[serde(alias = "harmonic")]
    Harmonic,
}

impl SignalKind {
    pub const ALL: [SignalKind; 3] = [Self::Rectangle, Self::Triangle, Self::Harmonic];

    pub fn label(self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle",
            Self::Triangle => "Triangle",
            Self::Harmonic => "Harmonic",
        }
    }

    /// True for waveforms whose formula divides by the period.
    pub fn needs_period(self) -> bool {
        matches!(self, Self::Rectangle | Self::Triangle)
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SignalKind {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(name))
            .ok_or_else(|| SignalError::UnknownKind {
                name: name.to_string(),
            })
    }
}

/// Everything needed to synthesize one excitation sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalSpec {
    pub kind: SignalKind,
    /// Peak voltage (V)
    pub amplitude_v: Real,
    pub frequency: Frequency,
    pub duration: Time,
}

impl SignalSpec {
    pub fn frequency_hz(&self) -> Real {
        as_hertz(self.frequency)
    }

    /// Sample this signal on `grid`.
    pub fn generate(&self, grid: &TimeGrid) -> SignalResult<Vec<Real>> {
        generate(self.kind, self.frequency_hz(), self.amplitude_v, grid)
    }
}

/// Rectangle wave: `amplitude` while `t mod P < P/2`, else `0`.
#[inline]
pub fn rectangle(t: Real, frequency_hz: Real, amplitude: Real) -> Real {
    let period = 1.0 / frequency_hz;
    let high = floor_mod(t, period) < period / 2.0;
    amplitude * if high { 1.0 } else { 0.0 }
}

/// Triangle wave: `2 * amplitude * |((t / P) mod 1) - 0.5|`.
#[inline]
pub fn triangle(t: Real, frequency_hz: Real, amplitude: Real) -> Real {
    let period = 1.0 / frequency_hz;
    2.0 * amplitude * (floor_mod(t / period, 1.0) - 0.5).abs()
}

/// Harmonic wave: `amplitude * sin(2π f t)`.
#[inline]
pub fn harmonic(t: Real, frequency_hz: Real, amplitude: Real) -> Real {
    amplitude * (2.0 * PI * frequency_hz * t).sin()
}

/// Build the excitation sequence for `kind`, index-aligned with `grid`.
///
/// # Errors
/// - [`SignalError::ZeroFrequency`] for Rectangle/Triangle with `frequency_hz == 0`
/// - [`SignalError::NonFinite`] for NaN or infinite parameters
pub fn generate(
    kind: SignalKind,
    frequency_hz: Real,
    amplitude: Real,
    grid: &TimeGrid,
) -> SignalResult<Vec<Real>> {
    if !frequency_hz.is_finite() {
        return Err(SignalError::NonFinite {
            what: "frequency",
            value: frequency_hz,
        });
    }
    if !amplitude.is_finite() {
        return Err(SignalError::NonFinite {
            what: "amplitude",
            value: amplitude,
        });
    }
    if kind.needs_period() && frequency_hz == 0.0 {
        return Err(SignalError::ZeroFrequency { kind });
    }

    let wave: fn(Real, Real, Real) -> Real = match kind {
        SignalKind::Rectangle => rectangle,
        SignalKind::Triangle => triangle,
        SignalKind::Harmonic => harmonic,
    };

    Ok(grid
        .times()
        .iter()
        .map(|&t| wave(t, frequency_hz, amplitude))
        .collect())
}
