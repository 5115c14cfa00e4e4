//! 1D viscous Burgers' equation on a periodic domain
//!
//! # Mathematical Background
//!
//! The viscous Burgers' equation combines nonlinear advection with
//! diffusion:
//!
//! ```text
//! ∂u/∂t + μ·u·∂u/∂x = ν·∂²u/∂x²
//! ```
//!
//! Where:
//! - **u** : the signal (e.g. velocity) [arbitrary units]
//! - **μ** : advection strength (dimensionless scaling of the nonlinearity)
//! - **ν** : kinematic viscosity [m²/s], must be ≥ 0 for diffusive stability
//!
//! With spatial derivatives evaluated spectrally the PDE becomes an
//! autonomous ODE system over the mesh values:
//!
//! ```text
//! du/dt = -μ·u ⊙ u_x + ν·u_xx
//! ```
//!
//! where `⊙` is element-wise multiplication. This is the right-hand side
//! the model computes.
//!
//! # Degenerate regimes
//!
//! - **μ = 0**: pure diffusion (heat equation); the pulse spreads and
//!   total energy decays monotonically.
//! - **ν = 0**: inviscid advection; gradients steepen without bound and a
//!   shock forms at `t* ≈ 1/(μ·max|u₀'|)`. Past that point the spectral
//!   representation cannot resolve the solution and adaptive integrators
//!   will shrink their steps until the budget runs out.
//!
//! # Example Usage
//!
//! ```rust
//! use burgers_rs::mesh::SpatialMesh;
//! use burgers_rs::models::BurgersModel;
//! use burgers_rs::physics::PhysicalModel;
//!
//! let mesh = SpatialMesh::new(100, 10.0).unwrap();
//! let model = BurgersModel::new(1.0, 0.01, &mesh).unwrap();
//!
//! let u0 = model.setup_initial_state();     // Gaussian pulse at x = 3
//! let du = model.compute_rhs(&u0, 0.0);
//! assert_eq!(du.len(), 100);
//! ```

use nalgebra::DVector;

use crate::error::SolverError;
use crate::mesh::{SpatialMesh, WavenumberGrid};
use crate::physics::{PhysicalModel, SpectralDifferentiator};

// =================================================================================================
// Burgers Model
// =================================================================================================

/// Viscous Burgers' equation with spectral spatial derivatives.
///
/// # Model Parameters
///
/// - **mu** (μ) : advection strength
/// - **nu** (ν) : kinematic viscosity, ≥ 0
///
/// # Precomputed data
///
/// The constructor derives the [`WavenumberGrid`] for the mesh and builds
/// the FFT plans once; every `compute_rhs` call reuses them. Coefficients
/// and grids are fixed for the duration of a solve; there is no mutable
/// state anywhere in the model.
///
/// # Thread Safety
///
/// `Send + Sync`: the wavenumber grid is read-only and the FFT plans are
/// shareable, so multiple solvers can reference the same model.
#[derive(Debug)]
pub struct BurgersModel {
    mu: f64,
    nu: f64,
    wavenumbers: WavenumberGrid,
    operator: SpectralDifferentiator,
    points: usize,
    dx: f64,
}

impl BurgersModel {
    /// Center of the default Gaussian pulse initial condition.
    pub const DEFAULT_PULSE_CENTER: f64 = 3.0;

    /// Create a Burgers model for the given coefficients and spatial mesh.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Configuration`] when `nu < 0` (anti-diffusion
    /// is unconditionally unstable) or either coefficient is not finite.
    pub fn new(mu: f64, nu: f64, mesh: &SpatialMesh) -> Result<Self, SolverError> {
        if !mu.is_finite() || !nu.is_finite() {
            return Err(SolverError::config(format!(
                "coefficients must be finite, got mu = {}, nu = {}",
                mu, nu
            )));
        }
        if nu < 0.0 {
            return Err(SolverError::config(format!(
                "kinematic viscosity must be non-negative, got nu = {}",
                nu
            )));
        }

        Ok(Self {
            mu,
            nu,
            wavenumbers: WavenumberGrid::for_mesh(mesh),
            operator: SpectralDifferentiator::new(mesh.points()),
            points: mesh.points(),
            dx: mesh.dx(),
        })
    }

    /// Advection strength μ.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Kinematic viscosity ν.
    pub fn nu(&self) -> f64 {
        self.nu
    }

    /// The wavenumber grid derived from the construction mesh.
    pub fn wavenumbers(&self) -> &WavenumberGrid {
        &self.wavenumbers
    }

    /// Gaussian pulse `u0(x) = exp(-(x - center)² / (2·width²))`.
    ///
    /// The reference configuration uses `center = 3`, `width = 1`.
    pub fn gaussian_pulse(&self, mesh: &SpatialMesh, center: f64, width: f64) -> DVector<f64> {
        mesh.evaluate(|x| (-(x - center).powi(2) / (2.0 * width * width)).exp())
    }
}

impl PhysicalModel for BurgersModel {
    fn points(&self) -> usize {
        self.points
    }

    /// `du/dt = -μ·u ⊙ u_x + ν·u_xx`, element-wise over the mesh.
    ///
    /// The system is autonomous: `t` is required by the solver interface
    /// but does not enter the evaluation. Purely numerical failure modes
    /// only: NaN/Inf propagate from the derivative operator.
    fn compute_rhs(&self, u: &DVector<f64>, _t: f64) -> DVector<f64> {
        let (u_x, u_xx) = self.operator.derivatives(u, &self.wavenumbers);

        DVector::from_fn(self.points, |i, _| {
            -self.mu * u[i] * u_x[i] + self.nu * u_xx[i]
        })
    }

    fn setup_initial_state(&self) -> DVector<f64> {
        let dx = self.dx;
        DVector::from_fn(self.points, |i, _| {
            let x = i as f64 * dx;
            (-(x - Self::DEFAULT_PULSE_CENTER).powi(2) / 2.0).exp()
        })
    }

    fn name(&self) -> &str {
        "Viscous Burgers (spectral)"
    }

    fn description(&self) -> Option<&str> {
        Some("du/dt = -mu*u*u_x + nu*u_xx with Fourier spatial derivatives")
    }
}

// =================================================================================================
// Tests
// =================================================================================================
