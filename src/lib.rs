//! burgers-rs: Spectral Burgers' Equation Solver
//!
//! A solver for the 1D viscous Burgers' equation
//!
//! ```text
//! ∂u/∂t + μ·u·∂u/∂x = ν·∂²u/∂x²
//! ```
//!
//! on a periodic domain, using Fourier (spectral) differentiation in space
//! and adaptive Runge-Kutta integration in time.
//!
//! # Architecture
//!
//! burgers-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical models define equations (what to solve)
//!    - Numerical solvers provide methods (how to solve)
//!
//! 2. **Explicit parameters and structured errors**
//!    - Meshes and coefficients are plain immutable structs, no global state
//!    - Configuration problems fail before integration starts
//!    - A blown step budget surfaces as an error, never as truncated output
//!
//! The PDE is converted into an ODE system by evaluating spatial
//! derivatives in the frequency domain (differentiation becomes
//! multiplication by `i·k` and `-k²`), then the resulting autonomous
//! system `du/dt = f(u)` is advanced over a fixed output time mesh.
//!
//! # Quick Start
//!
//! ```rust
//! use burgers_rs::mesh::{SpatialMesh, TemporalMesh};
//! use burgers_rs::models::BurgersModel;
//! use burgers_rs::solver::{Rkf45Solver, Scenario, Solver, SolverConfiguration};
//!
//! # fn main() -> Result<(), burgers_rs::SolverError> {
//! // 1. Discretize space and time
//! let space = SpatialMesh::new(100, 10.0)?;    // 100 points over [0, 10)
//! let time = TemporalMesh::new(10, 1.0)?;      // 10 stamps over [0, 1]
//!
//! // 2. Configure the physical model (μ = 1, ν = 0.1)
//! let model = BurgersModel::new(1.0, 0.1, &space)?;
//! let initial = model.gaussian_pulse(&space, 3.0, 1.0);
//! let scenario = Scenario::new(Box::new(model), initial);
//!
//! // 3. Configure and run the solver
//! let config = SolverConfiguration::new(time);
//! let solver = Rkf45Solver::new();
//! let solution = solver.solve(&scenario, &config)?;
//!
//! // 4. Access results: (N_x × N_t) space-time field
//! assert_eq!(solution.shape(), (100, 10));
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`mesh`]: Spatial/temporal meshes and the wavenumber grid
//! - [`physics`]: Model trait and the spectral derivative operator
//! - [`models`]: Concrete physical models (Burgers' equation)
//! - [`solver`]: Numerical solvers (adaptive RKF45, fixed-step RK4)

// Core modules
pub mod error;
pub mod mesh;
pub mod physics;

pub mod models;
pub mod solver;

pub use error::SolverError;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use burgers_rs::prelude::*;
    //! ```
    pub use crate::error::SolverError;
    pub use crate::mesh::{SpatialMesh, TemporalMesh, WavenumberGrid};
    pub use crate::models::BurgersModel;
    pub use crate::physics::{PhysicalModel, SpectralDifferentiator};
    pub use crate::solver::{
        RK4Solver, Rkf45Solver, Scenario, SolutionField, Solver, SolverConfiguration,
    };
}
