//! Run orchestration: validate, build the grid, synthesize, integrate.

use std::time::Instant;

use em_core::{DEFAULT_SAMPLE_RATE_HZ, Real, TimeGrid, hz};
use em_signal::SignalSpec;
use em_sim::{InitialState, MotorParameters, SimOptions, integrate};

use crate::error::AppResult;
use crate::params::ParameterSet;
use crate::result::SimulationResult;
use crate::validate::{validate, validate_inputs};

/// Numerical options for a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunOptions {
    /// Grid sampling rate (Hz); the step size follows from it
    pub sample_rate_hz: Real,
    pub sim: SimOptions,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            sim: SimOptions::default(),
        }
    }
}

/// Simulate the motor with the reference numerics (1 kHz, forward Euler).
///
/// Fails with [`crate::ValidationError`] before any computation when the
/// inputs cannot be simulated.
pub fn run(
    params: &MotorParameters,
    init: &InitialState,
    signal: &SignalSpec,
) -> AppResult<SimulationResult> {
    run_with_options(params, init, signal, &RunOptions::default())
}

/// Simulate everything described by a parameter set.
pub fn run_parameter_set(set: &ParameterSet) -> AppResult<SimulationResult> {
    validate(set)?;
    run_with_options(&set.motor, &set.initial, &set.signal_spec(), &set.run_options())
}

pub fn run_with_options(
    params: &MotorParameters,
    init: &InitialState,
    signal: &SignalSpec,
    options: &RunOptions,
) -> AppResult<SimulationResult> {
    let started = Instant::now();
    let span = tracing::info_span!("run", kind = %signal.kind);
    let _guard = span.enter();

    validate_inputs(params, init, signal, options.sample_rate_hz).inspect_err(|e| {
        tracing::info!(error = %e, "run rejected");
    })?;

    let grid = TimeGrid::new(signal.duration, hz(options.sample_rate_hz))?;
    tracing::debug!(samples = grid.len(), dt = grid.dt(), "built time grid");

    let u = signal.generate(&grid)?;
    tracing::debug!(
        amplitude = signal.amplitude_v,
        frequency = signal.frequency_hz(),
        "synthesized excitation"
    );

    let trajectory = integrate(params, init, &grid, &u, &options.sim)?;

    let result = SimulationResult {
        t: grid.into_inner(),
        u,
        i: trajectory.i,
        omega: trajectory.omega,
    };

    tracing::info!(
        samples = result.len(),
        integrator = options.sim.integrator.label(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
        "simulation completed"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::validate::ValidationError;
    use em_core::s;
    use em_signal::SignalKind;

    fn rectangle(duration_s: f64) -> SignalSpec {
        SignalSpec {
            kind: SignalKind::Rectangle,
            amplitude_v: 1.0,
            frequency: hz(1.0),
            duration: s(duration_s),
        }
    }

    #[test]
    fn run_options_defaults() {
        let opts = RunOptions::default();
        assert_eq!(opts.sample_rate_hz, 1000.0);
        assert_eq!(opts.sim, SimOptions::default());
    }

    #[test]
    fn zero_inductance_rejected_without_result() {
        let params = MotorParameters {
            l: 0.0,
            ..Default::default()
        };
        let err = run(&params, &InitialState::default(), &rectangle(1.0)).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::ZeroInductance)
        ));
    }

    #[test]
    fn sample_rate_option_changes_grid() {
        let opts = RunOptions {
            sample_rate_hz: 200.0,
            ..Default::default()
        };
        let result = run_with_options(
            &MotorParameters::default(),
            &InitialState::default(),
            &rectangle(2.0),
            &opts,
        )
        .unwrap();
        assert_eq!(result.len(), 400);
    }
}
