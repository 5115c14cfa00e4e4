//! Physical models and spatial differentiation
//!
//! This module defines the physics side of the WHAT/HOW split:
//!
//! - [`PhysicalModel`]: trait implemented by anything that can evaluate
//!   the right-hand side `f(u, t)` of an ODE system `du/dt = f(u, t)`
//! - [`SpectralDifferentiator`]: first and second spatial derivatives via
//!   the discrete Fourier transform
//!
//! Models encapsulate the equations; the [`solver`](crate::solver) module
//! supplies the numerical methods that integrate them.

pub mod spectral;
pub mod traits;

pub use spectral::SpectralDifferentiator;
pub use traits::PhysicalModel;
