//! Spatial, temporal and wavenumber meshes
//!
//! All three grids are constructed once at setup from `(count, extent)`
//! pairs and are immutable afterwards:
//!
//! - [`SpatialMesh`]: `N_x` sample positions evenly spaced over `[0, L_x)`.
//!   The right endpoint is excluded because the discrete Fourier transform
//!   identifies it with the left one (periodic boundary).
//! - [`TemporalMesh`]: `N_t` output time stamps evenly spaced over
//!   `[0, L_t]`, endpoints included.
//! - [`WavenumberGrid`]: the discrete angular wavenumbers conjugate to a
//!   [`SpatialMesh`] under the DFT convention: zero frequency first,
//!   positive frequencies, then negative frequencies wrapped to the upper
//!   half, all scaled by `2π/(N·dx)`.
//!
//! # Convention
//!
//! The wavenumber ordering matches the output ordering of the forward FFT,
//! so frequency-domain coefficients can be multiplied element-wise by
//! `i·k` or `-k²` without any reshuffling.

use nalgebra::DVector;
use std::f64::consts::PI;

use crate::error::SolverError;

// =================================================================================================
// Spatial Mesh
// =================================================================================================

/// Evenly spaced sample positions over `[0, L_x)`.
///
/// Invariant: `dx = L_x / N_x` is constant; count and spacing never change
/// after construction.
///
/// # Example
///
/// ```rust
/// use burgers_rs::mesh::SpatialMesh;
///
/// let mesh = SpatialMesh::new(100, 10.0).unwrap();
/// assert_eq!(mesh.points(), 100);
/// assert!((mesh.dx() - 0.1).abs() < 1e-12);
/// assert_eq!(mesh.positions()[0], 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct SpatialMesh {
    positions: DVector<f64>,
    length: f64,
    dx: f64,
}

impl SpatialMesh {
    /// Create a periodic spatial mesh with `points` samples over `[0, length)`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Configuration`] when `points == 0` or
    /// `length <= 0`.
    pub fn new(points: usize, length: f64) -> Result<Self, SolverError> {
        if points == 0 {
            return Err(SolverError::config("spatial mesh needs at least one point"));
        }
        if !(length > 0.0) {
            return Err(SolverError::config(format!(
                "spatial domain length must be positive, got {}",
                length
            )));
        }

        let dx = length / points as f64;
        let positions = DVector::from_fn(points, |i, _| i as f64 * dx);

        Ok(Self {
            positions,
            length,
            dx,
        })
    }

    /// Number of sample positions `N_x`.
    pub fn points(&self) -> usize {
        self.positions.len()
    }

    /// Constant sample spacing `dx = L_x / N_x`.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Domain length `L_x`.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The sample positions `x_i = i·dx`.
    pub fn positions(&self) -> &DVector<f64> {
        &self.positions
    }

    /// Evaluate a pointwise function of position over the mesh.
    ///
    /// This is how callers build an initial condition:
    ///
    /// ```rust
    /// use burgers_rs::mesh::SpatialMesh;
    ///
    /// let mesh = SpatialMesh::new(100, 10.0).unwrap();
    /// let u0 = mesh.evaluate(|x| (-(x - 3.0_f64).powi(2) / 2.0).exp());
    /// assert_eq!(u0.len(), 100);
    /// ```
    pub fn evaluate(&self, f: impl Fn(f64) -> f64) -> DVector<f64> {
        self.positions.map(f)
    }
}

// =================================================================================================
// Temporal Mesh
// =================================================================================================

/// Evenly spaced output time stamps over `[0, L_t]`, endpoints included.
///
/// `N_t = 1` degenerates to the single stamp `[0]`: the solver then
/// returns the initial condition without integrating.
#[derive(Debug, Clone)]
pub struct TemporalMesh {
    stamps: DVector<f64>,
    duration: f64,
}

impl TemporalMesh {
    /// Create a temporal mesh with `points` stamps over `[0, duration]`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Configuration`] when `points == 0` or
    /// `duration <= 0`.
    pub fn new(points: usize, duration: f64) -> Result<Self, SolverError> {
        if points == 0 {
            return Err(SolverError::config("temporal mesh needs at least one stamp"));
        }
        if !(duration > 0.0) {
            return Err(SolverError::config(format!(
                "simulation duration must be positive, got {}",
                duration
            )));
        }

        // Stamps are computed from the index, not accumulated, so the last
        // stamp is exactly `duration` within machine epsilon.
        let stamps = if points == 1 {
            DVector::from_element(1, 0.0)
        } else {
            let dt = duration / (points - 1) as f64;
            DVector::from_fn(points, |j, _| j as f64 * dt)
        };

        Ok(Self { stamps, duration })
    }

    /// Number of output stamps `N_t`.
    pub fn points(&self) -> usize {
        self.stamps.len()
    }

    /// Total duration `L_t`.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Output spacing `L_t / (N_t - 1)`, or `None` for a single stamp.
    pub fn dt(&self) -> Option<f64> {
        if self.points() > 1 {
            Some(self.duration / (self.points() - 1) as f64)
        } else {
            None
        }
    }

    /// The time stamps `t_j`.
    pub fn stamps(&self) -> &DVector<f64> {
        &self.stamps
    }
}

// =================================================================================================
// Wavenumber Grid
// =================================================================================================

/// Discrete angular wavenumbers conjugate to a [`SpatialMesh`].
///
/// For `N` samples with spacing `dx`, entry `i` holds
///
/// ```text
/// k_i = 2π/(N·dx) · m_i,   m_i = i            for i ≤ (N-1)/2
///                          m_i = i - N        otherwise
/// ```
///
/// i.e. zero frequency first, then positive frequencies, then negative
/// frequencies folded onto the upper half of the array, the standard
/// FFT output ordering. Differentiation in the frequency domain is then
/// element-wise multiplication by `i·k_i` (first derivative) or `-k_i²`
/// (second derivative).
#[derive(Debug, Clone)]
pub struct WavenumberGrid {
    values: DVector<f64>,
}

impl WavenumberGrid {
    /// Derive the wavenumber grid for a spatial mesh.
    ///
    /// Deterministic in `(N_x, dx)`; computed once, read-only thereafter.
    pub fn for_mesh(mesh: &SpatialMesh) -> Self {
        Self::from_spacing(mesh.points(), mesh.dx())
    }

    /// Derive the wavenumber grid from a raw `(count, spacing)` pair.
    pub fn from_spacing(points: usize, dx: f64) -> Self {
        let scale = 2.0 * PI / (points as f64 * dx);
        let half = (points.max(1) - 1) / 2;

        let values = DVector::from_fn(points, |i, _| {
            let mode = if i <= half {
                i as f64
            } else {
                i as f64 - points as f64
            };
            scale * mode
        });

        Self { values }
    }

    /// Number of wavenumbers (equals `N_x` of the originating mesh).
    pub fn points(&self) -> usize {
        self.values.len()
    }

    /// The angular wavenumbers in FFT output ordering.
    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    /// Largest resolvable wavenumber magnitude (Nyquist).
    pub fn nyquist(&self) -> f64 {
        self.values.amax()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
