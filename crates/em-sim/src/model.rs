//! TransientModel trait for pluggable dynamic systems.

use em_core::Real;

use crate::error::SimResult;

/// An ODE system `dx/dt = f(t, x)` with a vector-like state.
///
/// Implementors provide:
/// - State type (Clone, for snapshots)
/// - Initial state
/// - RHS (right-hand side) computation
/// - `x + a * dx`, the only state arithmetic the integrators need
pub trait TransientModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Return the state at t=0.
    fn initial_state(&self) -> Self::State;

    /// Compute state derivative dxdt = f(t, x).
    fn rhs(&self, t: Real, x: &Self::State) -> SimResult<Self::State>;

    /// Return `x + a * dx` element-wise.
    fn axpy(&self, x: &Self::State, a: Real, dx: &Self::State) -> Self::State;
}
