//! Classical fourth-order Runge-Kutta solver
//!
//! # Mathematical Background
//!
//! The classical RK4 scheme advances `dy/dt = f(y, t)` with a weighted
//! average of four slope estimates:
//!
//! ```text
//! k₁ = f(yₙ, tₙ)
//! k₂ = f(yₙ + h/2·k₁, tₙ + h/2)
//! k₃ = f(yₙ + h/2·k₂, tₙ + h/2)
//! k₄ = f(yₙ + h·k₃,   tₙ + h)
//!
//! yₙ₊₁ = yₙ + h/6·(k₁ + 2k₂ + 2k₃ + k₄)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: fourth-order accurate, O(h⁴) global error
//! - **Cost**: 4 function evaluations per step, no rejections
//! - **No error control**: the step size is fixed at
//!   `interval / substeps`, so stability is entirely the caller's
//!   responsibility. The adaptive [`Rkf45Solver`](super::Rkf45Solver) is
//!   the primary driver; this method is kept for convergence testing and
//!   benchmarking.

use nalgebra::{DMatrix, DVector};

use crate::error::SolverError;
use crate::solver::{validate_signal, Scenario, SolutionField, Solver, SolverConfiguration};

// =================================================================================================
// RK4 Solver
// =================================================================================================

/// Fixed-step fourth-order Runge-Kutta method.
///
/// Takes `substeps` equal sub-steps between each pair of consecutive
/// output times and records the state at every output time.
///
/// # Example
///
/// ```rust
/// use burgers_rs::solver::RK4Solver;
///
/// let solver = RK4Solver::new();            // 100 sub-steps per interval
/// let fine = RK4Solver::with_substeps(500); // finer fixed step
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RK4Solver {
    substeps: usize,
}

impl RK4Solver {
    /// Default number of sub-steps per output interval.
    pub const DEFAULT_SUBSTEPS: usize = 100;

    /// Create an RK4 solver with the default sub-step count.
    pub fn new() -> Self {
        Self {
            substeps: Self::DEFAULT_SUBSTEPS,
        }
    }

    /// Create an RK4 solver with an explicit sub-step count.
    pub fn with_substeps(substeps: usize) -> Self {
        Self { substeps }
    }

    /// Sub-steps taken between consecutive output times.
    pub fn substeps(&self) -> usize {
        self.substeps
    }
}

impl Default for RK4Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for RK4Solver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SolutionField, SolverError> {
        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        if self.substeps == 0 {
            return Err(SolverError::config("RK4 needs at least one sub-step"));
        }

        // ====== Step 2: Setup ======

        let times = config.temporal().stamps().clone();
        let n_t = times.len();
        let n_x = scenario.model.points();
        let model = scenario.model.as_ref();

        let mut field = DMatrix::zeros(n_x, n_t);
        let mut state = scenario.initial.clone();

        validate_signal(&state, 0)?;
        field.set_column(0, &state);

        // ====== Step 3: Time Integration ======

        for j in 1..n_t {
            let t_start = times[j - 1];
            let h = (times[j] - t_start) / self.substeps as f64;

            for step in 0..self.substeps {
                // Sub-step times come from the index, not accumulation, so
                // rounding error does not build up over long solves.
                let t = t_start + step as f64 * h;

                let k1 = model.compute_rhs(&state, t);
                let k2 = model.compute_rhs(&(&state + &k1 * (h / 2.0)), t + h / 2.0);
                let k3 = model.compute_rhs(&(&state + &k2 * (h / 2.0)), t + h / 2.0);
                let k4 = model.compute_rhs(&(&state + &k3 * h), t + h);

                state += (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0);
            }

            validate_signal(&state, j)?;
            field.set_column(j, &state);
        }

        // ====== Step 4: Build Result ======

        let evaluations = 4 * self.substeps * n_t.saturating_sub(1);
        let mut result = SolutionField::new(times, field);
        result.add_metadata("solver", self.name());
        result.add_metadata("substeps per interval", &self.substeps.to_string());
        result.add_metadata("function evaluations", &evaluations.to_string());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Runge-Kutta 4"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
