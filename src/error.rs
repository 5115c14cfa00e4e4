//! Solver error taxonomy
//!
//! Three classes of failure can reach a caller:
//!
//! - **Configuration**: malformed meshes or mismatched vector lengths.
//!   Always detected before integration starts (fail fast, not mid-solve).
//! - **IntegrationFailure**: the adaptive integrator exhausted its internal
//!   step budget between two consecutive output times. This signals
//!   stiffness or instability beyond the solver tolerance and is surfaced
//!   with the failing time index so the caller can diagnose it.
//! - **NonFinite**: NaN or infinity detected in a recorded state column,
//!   typically from an unresolved shock when ν is too small for the mesh.
//!
//! None of these are recovered internally: retrying an integration step
//! with the same parameters cannot change its outcome, so every error
//! propagates to the immediate caller via `Result` and `?`.

use thiserror::Error;

/// Errors produced by scenario validation and time integration.
#[derive(Debug, Error)]
pub enum SolverError {
    /// Malformed mesh parameters or inconsistent vector lengths.
    ///
    /// Raised by `SpatialMesh::new`, `TemporalMesh::new`,
    /// `SolverConfiguration::validate` and `Scenario::validate`, always
    /// before the first right-hand-side evaluation.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The integrator could not reach the next requested output time
    /// within its internal step budget.
    #[error(
        "integration failed to reach output time t = {time} (index {time_index}): \
         internal step budget of {max_internal_steps} exhausted"
    )]
    IntegrationFailure {
        /// Index into the temporal mesh of the unreachable output time.
        time_index: usize,
        /// The unreachable output time itself.
        time: f64,
        /// The budget that was exhausted.
        max_internal_steps: usize,
    },

    /// NaN or infinity appeared in the state recorded at an output time.
    #[error(
        "non-finite value ({kind}) in state at output time index {time_index}; \
         this indicates numerical instability; try a larger nu or a finer mesh"
    )]
    NonFinite {
        /// `"NaN"` or `"Inf"`.
        kind: &'static str,
        /// Index into the temporal mesh where the value was recorded.
        time_index: usize,
    },
}

impl SolverError {
    /// Shorthand used by validation code throughout the crate.
    pub(crate) fn config(message: impl Into<String>) -> Self {
        SolverError::Configuration(message.into())
    }
}
