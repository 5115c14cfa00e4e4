//! Numerical solvers
//!
//! This module provides the trait seams and concrete implementations for
//! integrating a [`PhysicalModel`](crate::physics::PhysicalModel) over a
//! fixed output time mesh.
//!
//! # The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario**: WHAT to solve. The physical model and its initial
//!    condition.
//! 2. **SolverConfiguration**: HOW to solve. The output time mesh, the
//!    adaptive error tolerances and the internal step budget.
//! 3. **Solver**: the numerical method itself, independent of physics.
//!
//! This separation allows the same solver to drive different physics, and
//! the same scenario to be solved by different methods for comparison.
//!
//! # Module Organization
//!
//! - **`traits`**: `Solver` trait, `SolverConfiguration`, `SolutionField`
//! - **`scenario`**: `Scenario` (model + initial condition + validation)
//! - **`methods`**: concrete integrators
//!   - [`Rkf45Solver`]: adaptive Runge-Kutta-Fehlberg 4(5), the primary
//!     driver, with per-interval step budgeting
//!   - [`RK4Solver`]: classical fixed-step fourth-order Runge-Kutta, kept
//!     as a reference method for convergence tests and benchmarks
//!
//! # Execution model
//!
//! A solve is one synchronous, single-threaded blocking call: no
//! suspension points, no shared mutable state across callers, no I/O in
//! the numerical phase. The output matrix is pre-sized to `(N_x, N_t)`
//! and filled column-by-column in increasing time order.
//!
//! # Error Handling
//!
//! All solver methods return `Result<SolutionField, SolverError>`:
//!
//! - malformed configuration or scenario → `Configuration`, before any
//!   right-hand-side evaluation
//! - step budget exhausted between output times → `IntegrationFailure`
//!   with the failing time index
//! - NaN/Inf in a recorded state → `NonFinite`
//!
//! There is no internal retry: repeating an integration step with the
//! same parameters cannot change its outcome.

// =================================================================================================
// Module Declarations
// =================================================================================================
mod methods;
mod scenario;
mod traits;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{SolutionField, Solver, SolverConfiguration};

pub use scenario::Scenario;

pub use methods::{RK4Solver, Rkf45Solver};

// =================================================================================================
// Helper Functions
// =================================================================================================

use nalgebra::DVector;

use crate::error::SolverError;

/// Validate a recorded state for numerical issues.
///
/// NaN arises from 0/0 or Inf − Inf, infinity from overflow; either means
/// the integration has gone unstable and the result would be meaningless.
/// Drivers call this on every column they record.
pub(crate) fn validate_signal(state: &DVector<f64>, time_index: usize) -> Result<(), SolverError> {
    if state.iter().any(|v| v.is_nan()) {
        return Err(SolverError::NonFinite {
            kind: "NaN",
            time_index,
        });
    }
    if state.iter().any(|v| v.is_infinite()) {
        return Err(SolverError::NonFinite {
            kind: "Inf",
            time_index,
        });
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
