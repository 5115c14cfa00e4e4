//! Simulation scenario definition
//!
//! A scenario combines a physical model with its initial condition, the
//! "WHAT to solve". The same scenario can be handed to different solvers.

use nalgebra::DVector;

use crate::error::SolverError;
use crate::physics::PhysicalModel;

/// A physical model paired with the initial condition to integrate from.
///
/// # Validation
///
/// [`validate`](Self::validate) performs the fail-fast configuration
/// checks: the initial condition's length must match the model's point
/// count and contain only finite values. Every solver calls it before the
/// first right-hand-side evaluation, so malformed input never reaches the
/// numerical phase.
///
/// # Examples
///
/// ```rust
/// use burgers_rs::mesh::SpatialMesh;
/// use burgers_rs::models::BurgersModel;
/// use burgers_rs::solver::Scenario;
///
/// let mesh = SpatialMesh::new(100, 10.0).unwrap();
/// let model = BurgersModel::new(1.0, 0.01, &mesh).unwrap();
///
/// // Model-supplied reference initial condition...
/// let scenario = Scenario::from_model(Box::new(model));
///
/// // ...or an arbitrary caller-supplied vector:
/// let model = BurgersModel::new(1.0, 0.01, &mesh).unwrap();
/// let u0 = mesh.evaluate(|x| (0.2 * x).sin());
/// let scenario = Scenario::new(Box::new(model), u0);
/// assert!(scenario.validate().is_ok());
/// ```
pub struct Scenario {
    /// Physical model (equations).
    pub model: Box<dyn PhysicalModel>,

    /// State at `t = 0`.
    pub initial: DVector<f64>,
}

impl Scenario {
    /// Create a scenario from a model and an explicit initial condition.
    pub fn new(model: Box<dyn PhysicalModel>, initial: DVector<f64>) -> Self {
        Self { model, initial }
    }

    /// Create a scenario using the model's own default initial state.
    pub fn from_model(model: Box<dyn PhysicalModel>) -> Self {
        let initial = model.setup_initial_state();
        Self { model, initial }
    }

    /// Fail-fast consistency checks, run before integration starts.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.model.points() == 0 {
            return Err(SolverError::config("model has zero spatial points"));
        }
        if self.initial.len() != self.model.points() {
            return Err(SolverError::config(format!(
                "initial condition length {} does not match model points {}",
                self.initial.len(),
                self.model.points()
            )));
        }
        if self.initial.iter().any(|v| !v.is_finite()) {
            return Err(SolverError::config(
                "initial condition contains NaN or infinity",
            ));
        }
        Ok(())
    }

    /// Name of the underlying model.
    pub fn model_name(&self) -> &str {
        self.model.name()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("model", &self.model_name())
            .field("points", &self.model.points())
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct MockModel {
        points: usize,
    }

    impl PhysicalModel for MockModel {
        fn points(&self) -> usize {
            self.points
        }

        fn compute_rhs(&self, u: &DVector<f64>, _t: f64) -> DVector<f64> {
            u.clone()
        }

        fn setup_initial_state(&self) -> DVector<f64> {
            DVector::from_element(self.points, 1.0)
        }

        fn name(&self) -> &str {
            "MockModel"
        }
    }

    #[test]
    fn test_scenario_from_model_uses_default_state() {
        let scenario = Scenario::from_model(Box::new(MockModel { points: 8 }));

        assert_eq!(scenario.initial.len(), 8);
        assert!(scenario.validate().is_ok());
        assert_eq!(scenario.model_name(), "MockModel");
    }

    #[test]
    fn test_scenario_rejects_length_mismatch() {
        let scenario = Scenario::new(
            Box::new(MockModel { points: 8 }),
            DVector::from_element(5, 1.0),
        );

        let err = scenario.validate().unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_scenario_rejects_non_finite_initial_condition() {
        let mut initial = DVector::from_element(8, 1.0);
        initial[2] = f64::INFINITY;

        let scenario = Scenario::new(Box::new(MockModel { points: 8 }), initial);
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn test_debug_format_names_the_model() {
        let scenario = Scenario::from_model(Box::new(MockModel { points: 3 }));
        let text = format!("{:?}", scenario);
        assert!(text.contains("MockModel"));
    }
}
