//! Physical model trait
//!
//! The model provides the "physics" (equations), the solver provides the
//! "numerics" (method to solve them). A model never integrates anything
//! itself; it only evaluates the instantaneous rate of change of the
//! state vector.

use nalgebra::DVector;

// =================================================================================================
// Physical Model Trait
// =================================================================================================

/// Trait for physical models expressed as an ODE system `du/dt = f(u, t)`.
///
/// # Responsibility
///
/// Computes the right-hand side of the system at a given state. Does NOT
/// solve it (that's the solver's job).
///
/// # State representation
///
/// The state is a dense real vector of length [`points()`](Self::points),
/// one entry per spatial sample. Solvers treat it as a value type: it is
/// copied, not aliased, across integration steps, so `compute_rhs` must
/// not retain references to its input.
///
/// # Purity
///
/// `compute_rhs` must be a pure function of `(u, t)`: no interior
/// mutability, no accumulation across calls. Adaptive solvers evaluate it
/// at trial states that are later rejected, so any side effect would
/// corrupt the simulation.
pub trait PhysicalModel: Send + Sync {
    /// Number of spatial points.
    ///
    /// Used by solvers to size vectors and by scenario validation to
    /// cross-check the initial condition.
    fn points(&self) -> usize;

    /// Evaluate `du/dt` at state `u` and time `t`.
    ///
    /// For autonomous systems `t` is accepted but unused; the general
    /// solver interface still passes it so non-autonomous models fit the
    /// same seam.
    fn compute_rhs(&self, u: &DVector<f64>, t: f64) -> DVector<f64>;

    /// Default initial spatial distribution for this model.
    ///
    /// Callers may always supply their own vector to
    /// [`Scenario::new`](crate::solver::Scenario::new) instead.
    fn setup_initial_state(&self) -> DVector<f64>;

    /// Name of the model (used for display and logging).
    fn name(&self) -> &str;

    /// Description of the model (optional).
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Tests
// =================================================================================================
