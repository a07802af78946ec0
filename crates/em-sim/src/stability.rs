//! Step-size stability check for the explicit integrators.
//!
//! The motor equations are linear, `dx/dt = A x + B u`, with
//!
//! ```text
//!     | -R/L   0    -Ke/L |
//! A = |   0    0      1   |
//!     |  Kt/J -k/J    0   |
//! ```
//!
//! An explicit method with step `dt` stays bounded when its amplification
//! factor `|R(dt·λ)|` is at most one for every eigenvalue `λ` of `A`
//! (`R(z) = 1 + z` for forward Euler). The fixed 1 ms step is kept regardless
//! of the outcome; the report only tells the caller what to expect.

use em_core::Real;
use nalgebra::{Complex, Matrix3};

use crate::motor::MotorParameters;
use crate::sim::IntegratorType;

/// Slack on the unit-circle test so marginally stable systems (e.g. `k = 0`) pass.
const STABILITY_SLACK: Real = 1e-9;

/// Outcome of the eigenvalue check.
#[derive(Clone, Debug, PartialEq)]
pub struct StabilityReport {
    pub integrator: IntegratorType,
    /// Step size the report was computed for (s)
    pub dt: Real,
    /// Eigenvalues of the system matrix (1/s)
    pub eigenvalues: Vec<Complex<Real>>,
    /// Largest `|R(dt·λ)|` over all eigenvalues
    pub amplification: Real,
}

impl StabilityReport {
    pub fn is_stable(&self) -> bool {
        self.amplification.is_finite() && self.amplification <= 1.0 + STABILITY_SLACK
    }

    /// Magnitude of the fastest mode (1/s).
    pub fn spectral_radius(&self) -> Real {
        self.eigenvalues
            .iter()
            .map(|l| l.norm())
            .fold(0.0, Real::max)
    }
}

/// Linear system matrix of the motor state `[i, θ, ω]`.
pub fn system_matrix(p: &MotorParameters) -> Matrix3<Real> {
    Matrix3::new(
        -p.r / p.l,
        0.0,
        -p.ke / p.l,
        0.0,
        0.0,
        1.0,
        p.kt / p.j,
        -p.k / p.j,
        0.0,
    )
}

fn amplification(integrator: IntegratorType, z: Complex<Real>) -> Real {
    let one = Complex::new(1.0, 0.0);
    match integrator {
        IntegratorType::ForwardEuler => (one + z).norm(),
        IntegratorType::RK4 => {
            let z2 = z * z;
            let z3 = z2 * z;
            let z4 = z3 * z;
            (one + z + z2 / 2.0 + z3 / 6.0 + z4 / 24.0).norm()
        }
    }
}

/// Stability of `integrator` with step `dt` for these parameters.
///
/// Parameters with `L == 0` or `J == 0` yield a non-finite amplification and
/// therefore an unstable report.
pub fn stability_report(
    params: &MotorParameters,
    dt: Real,
    integrator: IntegratorType,
) -> StabilityReport {
    let a = system_matrix(params);
    let eigenvalues: Vec<Complex<Real>> = if a.iter().all(|v| v.is_finite()) {
        a.complex_eigenvalues().iter().copied().collect()
    } else {
        Vec::new()
    };

    let amplification = if eigenvalues.is_empty() {
        Real::INFINITY
    } else {
        eigenvalues
            .iter()
            .map(|&l| amplification(integrator, l * dt))
            .fold(0.0, Real::max)
    };

    StabilityReport {
        integrator,
        dt,
        eigenvalues,
        amplification,
    }
}

/// Shorthand for the forward-Euler report.
pub fn euler_stability(params: &MotorParameters, dt: Real) -> StabilityReport {
    stability_report(params, dt, IntegratorType::ForwardEuler)
}
