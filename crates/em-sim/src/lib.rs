//! Transient simulation of a spring-loaded DC motor.
//!
//! Provides:
//! - Electrical/mechanical state equations of the motor
//! - Fixed-step explicit integrators (forward Euler, RK4)
//! - Trajectory integration over a [`em_core::TimeGrid`] with a held excitation
//! - Forward-Euler stability diagnostic from the linear system eigenvalues

pub mod error;
pub mod integrator;
pub mod model;
pub mod motor;
pub mod sim;
pub mod stability;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::TransientModel;
pub use motor::{DcMotorModel, InitialState, MotorParameters, MotorState};
pub use sim::{IntegratorType, MotorTrajectory, SimOptions, integrate};
pub use stability::{StabilityReport, euler_stability, stability_report};
