//! Helper functions for integration tests

use nalgebra::DVector;

/// Assert that two state vectors are close (within tolerance)
pub fn assert_states_close(
    state1: &DVector<f64>,
    state2: &DVector<f64>,
    tolerance: f64,
    message: &str,
) {
    assert_eq!(state1.len(), state2.len(), "{}: dimension mismatch", message);

    for (i, (&v1, &v2)) in state1.iter().zip(state2.iter()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: element {} differs by {} (tolerance {})",
            message,
            i,
            diff,
            tolerance
        );
    }
}

/// Root-mean-square error between two state vectors
pub fn compute_l2_error(state1: &DVector<f64>, state2: &DVector<f64>) -> f64 {
    assert_eq!(state1.len(), state2.len());

    let sum_squared_diff: f64 = state1
        .iter()
        .zip(state2.iter())
        .map(|(&v1, &v2)| (v1 - v2).powi(2))
        .sum();

    (sum_squared_diff / state1.len() as f64).sqrt()
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
