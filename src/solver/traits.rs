//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! - `SolverConfiguration` says HOW to solve: the output time mesh, the
//!   adaptive error tolerances and the internal step budget.
//! - `Scenario` (see [`scenario`](super::scenario)) says WHAT to solve.
//! - `Solver` applies a numerical method and returns a [`SolutionField`].
//!
//! The same scenario can be solved with different methods, and the same
//! method reused across scenarios; neither side knows the other's
//! internals.

use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;

use crate::error::SolverError;
use crate::mesh::TemporalMesh;
use crate::solver::Scenario;

// =================================================================================================
// Solver configuration
// =================================================================================================

/// How to integrate: output mesh, tolerances, step budget.
///
/// # Defaults
///
/// - `max_internal_steps = 5000`: upper bound on internal sub-steps the
///   integrator may take between two consecutive output times; exhausting
///   it raises [`SolverError::IntegrationFailure`] instead of silently
///   truncating the solve.
/// - `rel_tol = 1e-6`, `abs_tol = 1e-9`: adaptive error control targets
///   (ignored by fixed-step methods).
///
/// # Example
///
/// ```rust
/// use burgers_rs::mesh::TemporalMesh;
/// use burgers_rs::solver::SolverConfiguration;
///
/// let time = TemporalMesh::new(10, 1.0).unwrap();
/// let config = SolverConfiguration::new(time)
///     .with_max_internal_steps(200)
///     .with_tolerances(1e-8, 1e-11);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SolverConfiguration {
    temporal: TemporalMesh,
    max_internal_steps: usize,
    rel_tol: f64,
    abs_tol: f64,
}

impl SolverConfiguration {
    /// Default internal step budget per output interval.
    pub const DEFAULT_MAX_INTERNAL_STEPS: usize = 5000;

    /// Create a configuration over the given output time mesh.
    pub fn new(temporal: TemporalMesh) -> Self {
        Self {
            temporal,
            max_internal_steps: Self::DEFAULT_MAX_INTERNAL_STEPS,
            rel_tol: 1e-6,
            abs_tol: 1e-9,
        }
    }

    /// Override the internal step budget per output interval.
    pub fn with_max_internal_steps(mut self, max_internal_steps: usize) -> Self {
        self.max_internal_steps = max_internal_steps;
        self
    }

    /// Override the adaptive error tolerances.
    pub fn with_tolerances(mut self, rel_tol: f64, abs_tol: f64) -> Self {
        self.rel_tol = rel_tol;
        self.abs_tol = abs_tol;
        self
    }

    /// Output time mesh.
    pub fn temporal(&self) -> &TemporalMesh {
        &self.temporal
    }

    /// Internal step budget per output interval.
    pub fn max_internal_steps(&self) -> usize {
        self.max_internal_steps
    }

    /// Relative error tolerance.
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    /// Absolute error tolerance.
    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }

    /// Validate that the parameters are numerically meaningful.
    ///
    /// The temporal mesh validates itself at construction; this checks the
    /// solver-specific knobs. Called by every solver before integrating.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.max_internal_steps == 0 {
            return Err(SolverError::config(
                "internal step budget must be at least 1",
            ));
        }
        if !(self.rel_tol > 0.0) || !(self.abs_tol > 0.0) {
            return Err(SolverError::config(format!(
                "tolerances must be positive, got rel_tol = {}, abs_tol = {}",
                self.rel_tol, self.abs_tol
            )));
        }
        if !self.rel_tol.is_finite() || !self.abs_tol.is_finite() {
            return Err(SolverError::config("tolerances must be finite"));
        }
        Ok(())
    }
}

// =================================================================================================
// Solution field
// =================================================================================================

/// The accumulated space-time solution: a dense `(N_x × N_t)` real matrix
/// with columns indexed by output time, rows by spatial sample.
///
/// Built column-by-column by the integration driver, immutable once
/// returned. Column 0 is always the initial condition.
#[derive(Debug, Clone)]
pub struct SolutionField {
    /// Output times actually recorded (a copy of the temporal mesh).
    times: DVector<f64>,

    /// The space-time field, `field[(i, j)] = u(x_i, t_j)`.
    field: DMatrix<f64>,

    /// Convenience copy of the last recorded column.
    final_state: DVector<f64>,

    /// Free-form solver metadata (method name, step counts, ...).
    metadata: HashMap<String, String>,
}

impl SolutionField {
    /// Assemble a solution field from recorded data.
    ///
    /// # Panics
    ///
    /// Panics when `times.len()` differs from the number of columns.
    /// Drivers construct both from the same temporal mesh, so a mismatch
    /// is a programming error, not a runtime condition.
    pub fn new(times: DVector<f64>, field: DMatrix<f64>) -> Self {
        assert_eq!(
            times.len(),
            field.ncols(),
            "one recorded time per field column"
        );

        let final_state = field.column(field.ncols() - 1).into_owned();
        Self {
            times,
            field,
            final_state,
            metadata: HashMap::new(),
        }
    }

    /// `(N_x, N_t)` shape of the field.
    pub fn shape(&self) -> (usize, usize) {
        (self.field.nrows(), self.field.ncols())
    }

    /// Number of recorded output times.
    pub fn len(&self) -> usize {
        self.field.ncols()
    }

    /// True when nothing was recorded (never produced by the drivers).
    pub fn is_empty(&self) -> bool {
        self.field.ncols() == 0
    }

    /// Recorded output times.
    pub fn times(&self) -> &DVector<f64> {
        &self.times
    }

    /// The full space-time field.
    pub fn field(&self) -> &DMatrix<f64> {
        &self.field
    }

    /// State at output time index `j`.
    pub fn state_at(&self, j: usize) -> DVector<f64> {
        self.field.column(j).into_owned()
    }

    /// State at the final output time.
    pub fn final_state(&self) -> &DVector<f64> {
        &self.final_state
    }

    /// Total signal energy `Σ u_i²` at output time index `j`.
    ///
    /// Under pure diffusion this decays monotonically in `j`; the test
    /// suite uses it as a dissipation check.
    pub fn energy_at(&self, j: usize) -> f64 {
        self.field.column(j).iter().map(|&v| v * v).sum()
    }

    /// Post-hoc numerical-degeneracy check: does any recorded value
    /// contain NaN or infinity?
    ///
    /// Typically triggered by ν too small relative to μ and the mesh
    /// resolution (unresolved shock). Advisory: the solve itself reports
    /// non-finite recorded states as hard errors, but callers holding a
    /// field from elsewhere can re-check here.
    pub fn has_non_finite(&self) -> bool {
        self.field.iter().any(|v| !v.is_finite())
    }

    /// Attach a metadata entry.
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Read a metadata entry.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// A numerical time-integration method.
///
/// # Stability
///
/// This trait is the stable seam between numerics and physics: solvers
/// are stateless values, reusable across scenarios and safe to share.
pub trait Solver {
    /// Integrate `scenario` over `config`'s output mesh.
    ///
    /// # Errors
    ///
    /// - [`SolverError::Configuration`] before any integration when the
    ///   configuration or scenario is malformed
    /// - [`SolverError::IntegrationFailure`] when the internal step budget
    ///   is exhausted between two output times
    /// - [`SolverError::NonFinite`] when a recorded state contains
    ///   NaN/Inf
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SolutionField, SolverError>;

    /// Human-readable method name (used for display and metadata).
    fn name(&self) -> &str;
}

// =================================================================================================
// Tests
// =================================================================================================
