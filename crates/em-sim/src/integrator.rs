//! Fixed-step time integrators.

use em_core::Real;

use crate::error::SimResult;
use crate::model::TransientModel;

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step using the transient model.
    fn step<M: TransientModel>(
        &self,
        model: &M,
        t: Real,
        x: &M::State,
        dt: Real,
    ) -> SimResult<M::State>;
}

/// Forward Euler (explicit, 1st order).
///
/// `x_new = x + dt * f(t, x)`: the new state depends only on the previous
/// state and the input held over the step, with no per-step solve.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(
        &self,
        model: &M,
        t: Real,
        x: &M::State,
        dt: Real,
    ) -> SimResult<M::State> {
        let xdot = model.rhs(t, x)?;
        Ok(model.axpy(x, dt, &xdot))
    }
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Copy, Debug, Default)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: TransientModel>(
        &self,
        model: &M,
        t: Real,
        x: &M::State,
        dt: Real,
    ) -> SimResult<M::State> {
        let k1 = model.rhs(t, x)?;

        let x2 = model.axpy(x, 0.5 * dt, &k1);
        let k2 = model.rhs(t + 0.5 * dt, &x2)?;

        let x3 = model.axpy(x, 0.5 * dt, &k2);
        let k3 = model.rhs(t + 0.5 * dt, &x3)?;

        let x4 = model.axpy(x, dt, &k3);
        let k4 = model.rhs(t + dt, &x4)?;

        // x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = model.axpy(&model.axpy(&model.axpy(&k1, 2.0, &k2), 2.0, &k3), 1.0, &k4);

        Ok(model.axpy(x, dt / 6.0, &k_sum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// dx/dt = -x
    struct Decay;

    impl TransientModel for Decay {
        type State = Real;

        fn initial_state(&self) -> Real {
            1.0
        }

        fn rhs(&self, _t: Real, x: &Real) -> SimResult<Real> {
            Ok(-x)
        }

        fn axpy(&self, x: &Real, a: Real, dx: &Real) -> Real {
            x + a * dx
        }
    }

    #[test]
    fn euler_single_step() {
        let x = ForwardEuler.step(&Decay, 0.0, &1.0, 0.1).unwrap();
        assert!((x - 0.9).abs() < 1e-15);
    }

    #[test]
    fn rk4_tracks_exponential() {
        let mut x = Decay.initial_state();
        let dt = 0.01;
        for n in 0..100 {
            x = RK4.step(&Decay, n as Real * dt, &x, dt).unwrap();
        }
        assert!((x - (-1.0_f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn rk4_is_more_accurate_than_euler() {
        let dt = 0.05;
        let (mut xe, mut xr) = (1.0, 1.0);
        for n in 0..20 {
            let t = n as Real * dt;
            xe = ForwardEuler.step(&Decay, t, &xe, dt).unwrap();
            xr = RK4.step(&Decay, t, &xr, dt).unwrap();
        }
        let exact = (-1.0_f64).exp();
        assert!((xr - exact).abs() < (xe - exact).abs());
    }
}
