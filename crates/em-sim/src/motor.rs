//! Brushed DC motor driving a torsional spring load.

use em_core::Real;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::model::TransientModel;

/// Electrical and mechanical constants of the motor.
///
/// Models the coupled armature circuit and rotor:
///
/// ```text
/// di/dt = (u - R*i - Ke*ω) / L
/// dθ/dt = ω
/// dω/dt = (Kt*i - k*θ) / J
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorParameters {
    /// Armature resistance (Ω)
    #[serde(rename = "R")]
    pub r: Real,
    /// Armature inductance (H)
    #[serde(rename = "L")]
    pub l: Real,
    /// Torque constant (N·m/A)
    #[serde(rename = "Kt")]
    pub kt: Real,
    /// Back-EMF constant (V/(rad/s))
    #[serde(rename = "Ke")]
    pub ke: Real,
    /// Rotor moment of inertia (kg·m²)
    #[serde(rename = "J")]
    pub j: Real,
    /// Torsional stiffness of the load (N·m/rad)
    #[serde(rename = "k")]
    pub k: Real,
}

impl Default for MotorParameters {
    fn default() -> Self {
        Self {
            r: 10.0,
            l: 0.1,
            kt: 1.0,
            ke: 1.0,
            j: 1.0,
            k: 1.0,
        }
    }
}

impl MotorParameters {
    /// Time derivative of `state` under terminal voltage `u`.
    pub fn derivative(&self, state: &MotorState, u: Real) -> MotorState {
        MotorState {
            i: (u - self.r * state.i - self.ke * state.omega) / self.l,
            theta: state.omega,
            omega: (self.kt * state.i - self.k * state.theta) / self.j,
        }
    }

    /// Reject parameters that make the state equations singular.
    pub fn check(&self) -> SimResult<()> {
        if self.l == 0.0 {
            return Err(SimError::NonPhysical {
                what: "inductance L is zero",
            });
        }
        if self.j == 0.0 {
            return Err(SimError::NonPhysical {
                what: "inertia J is zero",
            });
        }
        Ok(())
    }
}

/// Rotor position and speed at t=0. Armature current always starts at zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialState {
    /// Angular position (rad)
    pub theta0: Real,
    /// Angular velocity (rad/s)
    pub omega0: Real,
}

impl Default for InitialState {
    fn default() -> Self {
        Self {
            theta0: 0.0,
            omega0: 1.0,
        }
    }
}

/// Integration state of the motor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotorState {
    /// Armature current (A)
    pub i: Real,
    /// Angular position (rad)
    pub theta: Real,
    /// Angular velocity (rad/s)
    pub omega: Real,
}

/// Motor model with a zero-order-held terminal voltage.
///
/// The runner calls [`DcMotorModel::hold`] with the excitation sample at the
/// start of each step; every RHS evaluation within that step sees the same
/// voltage.
#[derive(Clone, Debug)]
pub struct DcMotorModel {
    params: MotorParameters,
    init: InitialState,
    held_u: Real,
}

impl DcMotorModel {
    pub fn new(params: MotorParameters, init: InitialState) -> SimResult<Self> {
        params.check()?;
        Ok(Self {
            params,
            init,
            held_u: 0.0,
        })
    }

    /// Set the terminal voltage applied until the next call.
    pub fn hold(&mut self, u: Real) {
        self.held_u = u;
    }
}

impl TransientModel for DcMotorModel {
    type State = MotorState;

    fn initial_state(&self) -> MotorState {
        MotorState {
            i: 0.0,
            theta: self.init.theta0,
            omega: self.init.omega0,
        }
    }

    fn rhs(&self, _t: Real, x: &MotorState) -> SimResult<MotorState> {
        Ok(self.params.derivative(x, self.held_u))
    }

    fn axpy(&self, x: &MotorState, a: Real, dx: &MotorState) -> MotorState {
        MotorState {
            i: x.i + a * dx.i,
            theta: x.theta + a * dx.theta,
            omega: x.omega + a * dx.omega,
        }
    }
}
