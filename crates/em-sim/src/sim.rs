//! Trajectory integration over a sample grid.

use em_core::{Real, TimeGrid};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::TransientModel;
use crate::motor::{DcMotorModel, InitialState, MotorParameters};
use crate::stability::stability_report;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorType {
    /// Forward Euler (1st-order, 1 rhs call per step). Reference behaviour.
    #[default]
    ForwardEuler,
    /// 4th-order Runge-Kutta (4 rhs calls per step). Opt-in; results differ from Euler.
    #[serde(rename = "rk4", alias = "RK4")]
    RK4,
}

impl IntegratorType {
    pub fn label(self) -> &'static str {
        match self {
            Self::ForwardEuler => "forward Euler",
            Self::RK4 => "RK4",
        }
    }
}

/// Options for simulation runs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimOptions {
    /// Integrator type (default: forward Euler)
    pub integrator: IntegratorType,
}

/// State trajectories, index-aligned with the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct MotorTrajectory {
    /// Armature current (A)
    pub i: Vec<Real>,
    /// Angular position (rad)
    pub theta: Vec<Real>,
    /// Angular velocity (rad/s)
    pub omega: Vec<Real>,
}

impl MotorTrajectory {
    fn with_capacity(n: usize) -> Self {
        Self {
            i: Vec::with_capacity(n),
            theta: Vec::with_capacity(n),
            omega: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.i.len()
    }

    pub fn is_empty(&self) -> bool {
        self.i.is_empty()
    }
}

/// Integrate the motor over `grid` driven by excitation `u`.
///
/// Sample `x` is computed from sample `x-1` with `u[x-1]` held over the step,
/// using the grid's own spacing as the step size.
pub fn integrate(
    params: &MotorParameters,
    init: &InitialState,
    grid: &TimeGrid,
    u: &[Real],
    opts: &SimOptions,
) -> SimResult<MotorTrajectory> {
    let n = grid.len();
    if u.len() != n {
        return Err(SimError::LengthMismatch {
            what: "excitation",
            expected: n,
            actual: u.len(),
        });
    }
    if n < 2 {
        return Err(SimError::InvalidArg {
            what: "time grid needs at least 2 samples",
        });
    }

    let mut model = DcMotorModel::new(*params, *init)?;
    let dt = grid.dt();

    let report = stability_report(params, dt, opts.integrator);
    if !report.is_stable() {
        tracing::warn!(
            integrator = opts.integrator.label(),
            dt,
            amplification = report.amplification,
            "step size exceeds the stability limit for these parameters; trajectory may diverge"
        );
    }

    tracing::debug!(samples = n, dt, integrator = opts.integrator.label(), "integrating motor");

    match opts.integrator {
        IntegratorType::ForwardEuler => run_steps(&mut model, &ForwardEuler, grid, u),
        IntegratorType::RK4 => run_steps(&mut model, &RK4, grid, u),
    }
}

fn run_steps<I: Integrator>(
    model: &mut DcMotorModel,
    integrator: &I,
    grid: &TimeGrid,
    u: &[Real],
) -> SimResult<MotorTrajectory> {
    let t = grid.times();
    let dt = grid.dt();
    let mut out = MotorTrajectory::with_capacity(t.len());

    let mut x = model.initial_state();
    out.i.push(x.i);
    out.theta.push(x.theta);
    out.omega.push(x.omega);

    for k in 1..t.len() {
        model.hold(u[k - 1]);
        x = integrator.step(&*model, t[k - 1], &x, dt)?;
        out.i.push(x.i);
        out.theta.push(x.theta);
        out.omega.push(x.omega);
    }

    Ok(out)
}
