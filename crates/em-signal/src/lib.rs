//! Excitation signal synthesis for motorsim.
//!
//! Produces the driving-voltage sequence applied to the motor terminals,
//! sampled on an [`em_core::TimeGrid`]. Three periodic waveforms are
//! supported:
//!
//! - **Rectangle**: `amplitude` during the first half of each period, `0`
//!   during the second half (not zero-mean)
//! - **Triangle**: oscillates between `amplitude` (at whole periods) and `0`
//!   (at half periods)
//! - **Harmonic**: `amplitude * sin(2π f t)`
//!
//! Generation is pure and deterministic. Period-based waveforms reject a
//! zero frequency instead of producing an undefined period.

pub mod error;
pub mod waveform;

pub use error::{SignalError, SignalResult};
pub use waveform::{SignalKind, SignalSpec, generate, harmonic, rectangle, triangle};
