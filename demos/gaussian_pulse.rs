//! Example: Gaussian Pulse in a Periodic Channel
//!
//! ∂u/∂t + μ·u·∂u/∂x = ν·∂²u/∂x²
//!
//! Integrates the reference configuration (N_x = 100, L_x = 10, μ = 1,
//! ν = 0.1, u₀ = exp(-(x-3)²/2)) over one time unit, printing an ASCII
//! profile at each recorded output time plus energy and timing figures
//! for the adaptive and fixed-step drivers.
//!
//! ```bash
//! cargo run --example gaussian_pulse
//! ```

use std::error::Error;
use std::time::Instant;

use burgers_rs::mesh::{SpatialMesh, TemporalMesh};
use burgers_rs::models::BurgersModel;
use burgers_rs::solver::{
    RK4Solver, Rkf45Solver, Scenario, SolutionField, Solver, SolverConfiguration,
};

// =============================================================================
// Rendering helpers
// =============================================================================

/// Render one spatial profile as a coarse ASCII strip.
fn render_profile(state: &nalgebra::DVector<f64>, peak: f64) -> String {
    const LEVELS: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '@'];

    // Downsample to one character per two mesh points
    state
        .iter()
        .step_by(2)
        .map(|&u| {
            let level = ((u / peak).clamp(0.0, 1.0) * (LEVELS.len() - 1) as f64).round() as usize;
            LEVELS[level]
        })
        .collect()
}

fn print_solution(label: &str, solution: &SolutionField, elapsed_secs: f64) {
    println!("--- {} ---", label);
    println!(
        "  field shape: {} points x {} output times",
        solution.shape().0,
        solution.shape().1
    );
    if let Some(steps) = solution.metadata("accepted steps") {
        println!("  accepted steps:       {}", steps);
    }
    if let Some(evals) = solution.metadata("function evaluations") {
        println!("  function evaluations: {}", evals);
    }
    println!("  wall time: {:.3} ms", elapsed_secs * 1e3);

    let peak = solution.state_at(0).amax();
    for j in 0..solution.len() {
        println!(
            "  t = {:.3}  E = {:8.4}  |{}|",
            solution.times()[j],
            solution.energy_at(j),
            render_profile(&solution.state_at(j), peak)
        );
    }
    println!();
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<(), Box<dyn Error>> {
    let mu = 1.0;
    let nu = 0.1;

    let mesh = SpatialMesh::new(100, 10.0)?;
    let config = SolverConfiguration::new(TemporalMesh::new(10, 1.0)?);

    println!("Viscous Burgers equation, periodic domain");
    println!(
        "  N_x = {}, L_x = {}, dx = {:.3}",
        mesh.points(),
        mesh.length(),
        mesh.dx()
    );
    println!("  mu = {}, nu = {}\n", mu, nu);

    // Adaptive driver
    let scenario = Scenario::from_model(Box::new(BurgersModel::new(mu, nu, &mesh)?));
    let start = Instant::now();
    let adaptive = Rkf45Solver::new().solve(&scenario, &config)?;
    print_solution(
        "Runge-Kutta-Fehlberg 4(5)",
        &adaptive,
        start.elapsed().as_secs_f64(),
    );

    // Fixed-step reference
    let scenario = Scenario::from_model(Box::new(BurgersModel::new(mu, nu, &mesh)?));
    let start = Instant::now();
    let fixed = RK4Solver::with_substeps(100).solve(&scenario, &config)?;
    print_solution("Runge-Kutta 4", &fixed, start.elapsed().as_secs_f64());

    // Cross-check the two drivers
    let difference = (adaptive.final_state() - fixed.final_state()).amax();
    println!("max |RKF45 - RK4| at t = 1: {:.3e}", difference);

    let dissipated = adaptive.energy_at(0) - adaptive.energy_at(adaptive.len() - 1);
    println!(
        "energy dissipated by viscosity: {:.4} ({:.1}% of initial)",
        dissipated,
        100.0 * dissipated / adaptive.energy_at(0)
    );

    Ok(())
}
