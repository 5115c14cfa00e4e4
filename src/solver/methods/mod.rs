//! Numerical methods for time integration
//!
//! Concrete implementations of the [`Solver`](crate::solver::Solver)
//! trait. The trait is the stable seam; new methods are added here without
//! touching existing code.
//!
//! # Available Methods
//!
//! - **[`Rkf45Solver`]**: Runge-Kutta-Fehlberg 4(5) embedded pair with
//!   adaptive step-size control and a per-interval internal step budget.
//!   The primary driver: handles the mild stiffness of diffusive
//!   configurations and fails loudly on genuinely stiff ones.
//!
//! - **[`RK4Solver`]**: classical fourth-order Runge-Kutta with a fixed
//!   number of sub-steps per output interval. No error control; kept for
//!   convergence testing and benchmarking against the adaptive method.

mod rk4;
mod rkf45;

// Re-exports for convenience
pub use rk4::RK4Solver;
pub use rkf45::Rkf45Solver;
