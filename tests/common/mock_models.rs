//! Mock physical models with known analytic solutions
//!
//! Used by the integration tests to check solver behavior against exact
//! closed-form answers instead of reference data files.

use nalgebra::DVector;

use burgers_rs::physics::PhysicalModel;

/// `du/dt = -λ·u`, analytic solution `u(t) = u₀·exp(-λ·t)`.
pub struct ExponentialDecay {
    points: usize,
    decay_rate: f64,
}

impl ExponentialDecay {
    pub fn new(points: usize, decay_rate: f64) -> Self {
        Self { points, decay_rate }
    }
}

impl PhysicalModel for ExponentialDecay {
    fn points(&self) -> usize {
        self.points
    }

    fn compute_rhs(&self, u: &DVector<f64>, _t: f64) -> DVector<f64> {
        u * (-self.decay_rate)
    }

    fn setup_initial_state(&self) -> DVector<f64> {
        DVector::from_element(self.points, 1.0)
    }

    fn name(&self) -> &str {
        "Exponential Decay"
    }
}

/// `du/dt = c`, analytic solution `u(t) = u₀ + c·t`.
///
/// Linear in time, so every Runge-Kutta method integrates it exactly.
pub struct ConstantGrowth {
    points: usize,
    rate: f64,
}

impl ConstantGrowth {
    pub fn new(points: usize, rate: f64) -> Self {
        Self { points, rate }
    }
}

impl PhysicalModel for ConstantGrowth {
    fn points(&self) -> usize {
        self.points
    }

    fn compute_rhs(&self, _u: &DVector<f64>, _t: f64) -> DVector<f64> {
        DVector::from_element(self.points, self.rate)
    }

    fn setup_initial_state(&self) -> DVector<f64> {
        DVector::zeros(self.points)
    }

    fn name(&self) -> &str {
        "Constant Growth"
    }
}
